use std::{env, fs::read_to_string, path::PathBuf, process::exit, rc::Rc, time::Instant};

use veclang::{display_error, lexer::lexer::tokenize, parser::parser::parse};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: veclang <file>");
        exit(1);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let mut path_buf_string = env::current_dir().unwrap().into_os_string();
    path_buf_string.push("/");
    path_buf_string.push(file_path);
    let file_contents = read_to_string(path_buf_string.clone()).expect("Failed to read file!");

    let tokens = tokenize(file_contents, Some(String::from(file_name)));

    let tokens = match tokens {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(error, PathBuf::from(path_buf_string));
            exit(1);
        }
    };

    let parse_start = Instant::now();
    let program = parse(tokens, Rc::new(String::from(file_name)));

    let program = match program {
        Ok(program) => program,
        Err(error) => {
            display_error(error, PathBuf::from(path_buf_string));
            exit(1);
        }
    };

    println!("Parsed in {:?}", parse_start.elapsed());

    match program.run() {
        Ok(result) => {
            println!("{}", result);
            println!("Total time: {:?}", start.elapsed());
        }
        Err(error) => {
            println!("Error: {} ({})", error.get_error_name(), error.get_tip());
            exit(1);
        }
    }
}
