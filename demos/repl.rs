// REPL demo: reads lines with full editing and echoes them back. The echo
// stands in for a real command interpreter.

use zline::terminals::StdioTerminal;
use zline::{LineEditor, ReadOutcome};

fn main() {
    env_logger::init();

    println!("zline demo - type something and press Enter");
    println!("Type 'exit' to quit");
    println!("Keys: arrows, Home/End, Ctrl+A/E, Ctrl+K/U, Up/Down history, Ctrl+R search");
    println!();

    let mut editor = LineEditor::new(1024, 50);
    let mut terminal = StdioTerminal::new();

    loop {
        match editor.read_line(&mut terminal, "zline> ") {
            Ok(ReadOutcome::Accepted(line)) => {
                if line == "exit" {
                    println!("Goodbye!");
                    break;
                } else if !line.is_empty() {
                    println!("typed: {}", line);
                }
            }
            Ok(ReadOutcome::Cancelled) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                eprintln!("\nError reading input: {}", e);
                break;
            }
        }
    }
}
