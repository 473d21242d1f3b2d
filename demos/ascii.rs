use std::io::{self, Read};

/// Print a Data Matrix for the first argument, or for stdin if there is none.
///
/// Run with `RUST_LOG=datamatrix=debug` to see the codewords.
fn main() {
    env_logger::init();

    let text = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .expect("stdin is not valid UTF-8");
            buffer
        }
    };

    match datamatrix_text::encode(&text, None) {
        Ok(code) => print!("{}", code.bitmap().ascii()),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
