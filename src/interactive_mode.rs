// interactive_mode.rs
use std::io::{self, Write};

use log::info;

use crate::input_process::{thinking_delay, validate_message};
use crate::response_table::ResponseTable;
use crate::selector::select_response;

/// Console chat loop running beside the HTTP server. Same selector, same
/// thinking delay; no session transcript, the terminal scrollback is the
/// transcript here.
pub async fn run_interactive_mode(table: &ResponseTable) -> io::Result<()> {
    println!("Aimen assistant console. Type 'exit' to quit.");

    loop {
        print!("\nYou:\n");
        io::stdout().flush()?;

        let mut user_input = String::new();
        if io::stdin().read_line(&mut user_input)? == 0 {
            // EOF, e.g. when stdin is not a terminal
            break;
        }

        let Some(message) = validate_message(&user_input) else {
            continue;
        };

        if message.eq_ignore_ascii_case("exit") {
            info!("User requested exit");
            break;
        }

        info!("Console input: {}", message);
        tokio::time::sleep(thinking_delay()).await;
        println!("\nAIMEN:\n{}", select_response(table, message));
    }

    Ok(())
}
