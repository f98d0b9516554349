use std::io::{self, Write};

use owo_colors::OwoColorize;
use tern_interpreter::Evaluator;
use tern_lexer::Lexer;
use tern_parser::Parser;
use tern_syntax::token::{SourceLocation, TokenKind};

pub fn start_repl() {
    println!(
        "{}",
        "Tern REPL. Type :help for help, :quit to exit."
            .bold()
            .green()
    );

    let mut evaluator = Evaluator::new();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() {
            "tern> ".cyan().to_string()
        } else {
            "... > ".cyan().to_string()
        };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => {
                    println!("Goodbye.");
                    break;
                }
                ":help" | ":h" => {
                    println!(
                        "{}\n  {}  {}\n  {}  {}\n  {}  {}\n  {}  {}",
                        "Commands:".bold(),
                        ":help".yellow(),
                        "Show this help",
                        ":quit".yellow(),
                        "Exit the REPL",
                        ":vars".yellow(),
                        "List top-level variables",
                        ":funcs".yellow(),
                        "List defined functions"
                    );
                    println!("  {}  {}", ":reset".yellow(), "Clear all state");
                    println!("Type code to evaluate. Statements end with ';'; multi-line input is supported.");
                    continue;
                }
                ":vars" => {
                    print_names(&evaluator.var_names(), "<no vars>");
                    continue;
                }
                ":funcs" => {
                    print_names(&evaluator.func_names(), "<no functions>");
                    continue;
                }
                ":reset" => {
                    evaluator.reset();
                    println!("{}", "State reset.".yellow());
                    continue;
                }
                _ => {
                    println!("{}", "Unknown command. Type :help.".red());
                    continue;
                }
            }
        }

        buffer.push_str(&line);

        if !is_complete(&buffer) {
            continue;
        }

        match Parser::new(&buffer).parse_module() {
            Ok(module) => match evaluator.eval_module(&module) {
                Ok(last) => {
                    if let Some(value) = last {
                        println!("{}", value.to_string().bright_blue());
                    }
                }
                Err(e) => render_error("Runtime error", &buffer, &e.to_string(), None),
            },
            Err(e) => render_error("Parse error", &buffer, &e.to_string(), Some(e.loc())),
        }

        buffer.clear();
    }
}

fn print_names(names: &[String], empty_msg: &str) {
    if names.is_empty() {
        println!("{}", empty_msg.dimmed());
        return;
    }
    for name in names {
        println!("{}", name.yellow());
    }
}

fn render_error(kind: &str, source: &str, msg: &str, loc: Option<SourceLocation>) {
    eprintln!("{}: {}", kind.red().bold(), msg.red());
    if let Some(loc) = loc {
        if let Some(src_line) = source.lines().nth(loc.line) {
            eprintln!("  {}", src_line.bright_black());
            let mut marker = String::new();
            marker.push_str(&" ".repeat(loc.col));
            marker.push('^');
            eprintln!("  {}", marker.red());
        } else {
            eprintln!("  at {}", loc);
        }
    }
}

/// Whether the buffered input forms a complete unit worth parsing.
///
/// Counts bracket balance token-by-token; unbalanced opening brackets mean
/// the user is mid-construct and the REPL should keep reading lines. A lex
/// error counts as complete so the parser can report it.
fn is_complete(input: &str) -> bool {
    let mut lexer = Lexer::new(input);
    let mut paren = 0i32;
    let mut brace = 0i32;
    loop {
        match lexer.lex() {
            Ok(tok) => match tok.kind {
                TokenKind::LParen => paren += 1,
                TokenKind::RParen => paren -= 1,
                TokenKind::LBrace => brace += 1,
                TokenKind::RBrace => brace -= 1,
                TokenKind::Eof => break,
                _ => {}
            },
            Err(_) => return true,
        }
    }
    paren <= 0 && brace <= 0
}
