use std::io::{self, BufRead, Write};

use linux_sim::{Machine, Profile, Terminal};

const WINDOW: &str = "tty1";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn main() -> io::Result<()> {
    let mut machine = Machine::new(Profile::default());
    machine.open_terminal(WINDOW);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}", Terminal::welcome());

    let mut line = String::new();
    loop {
        if let Some(prompt) = machine.prompt(WINDOW) {
            print!("{prompt}");
        }
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // Ctrl-D
            println!();
            break;
        }

        let res = machine.run(WINDOW, line.trim_end_matches(['\n', '\r']));
        if res.clears_screen() {
            print!("{CLEAR_SCREEN}");
        }
        if !res.output().is_empty() {
            if res.is_error() {
                eprintln!("{}", res.output());
            } else {
                println!("{}", res.output());
            }
        }
        if let Some(app) = res.open_application() {
            println!("[{}] has no window in this shell", app.as_str());
        }
    }
    Ok(())
}
