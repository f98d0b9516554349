mod repl;

use std::fs;

use owo_colors::OwoColorize;
use tern_interpreter::Evaluator;
use tern_parser::Parser;
use tern_syntax::dump;
use tern_syntax::token::SourceLocation;

fn render_error(kind: &str, source: &str, msg: &str, loc: Option<SourceLocation>) {
    eprintln!("{}: {}", kind.red().bold(), msg.red());
    if let Some(loc) = loc {
        eprintln!("  --> line {}, column {}", loc.line, loc.col);
        if let Some(src_line) = source.lines().nth(loc.line) {
            let line_num_str = format!("{:3} | ", loc.line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            marker.push_str(&" ".repeat(loc.col));
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }
}

/// First non-flag argument is the script path; no path means REPL.
fn parse_path(args: &[String]) -> Option<&str> {
    args.iter()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .map(|a| a.as_str())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let show_ast = args.iter().skip(1).any(|a| a == "--ast" || a == "-a");

    let path = match parse_path(&args) {
        Some(p) => p,
        None => {
            repl::start_repl();
            return;
        }
    };

    let src = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path, e).red()
            );
            std::process::exit(1);
        }
    };

    let module = match Parser::new(&src).parse_module() {
        Ok(m) => m,
        Err(e) => {
            render_error("Parse error", &src, &e.to_string(), Some(e.loc()));
            std::process::exit(1);
        }
    };

    if show_ast {
        println!("{}", dump::module_to_string(&module));
    }

    let mut evaluator = Evaluator::new();
    match evaluator.eval_module(&module) {
        // Print the value of the last top-level expression, if any.
        Ok(Some(value)) => println!("{}", value),
        Ok(None) => {}
        Err(e) => {
            render_error("Runtime error", &src, &e.to_string(), None);
            std::process::exit(1);
        }
    }
}
