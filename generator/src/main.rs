mod cli;
mod compile;
mod emit;
mod loader;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();

    let source = read_input(&cli.input);
    let options = roxmltree::ParsingOptions {
        allow_dtd: cli.allow_dtd,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(&source, options).unwrap();

    let schema = loader::load_schema(&document);
    let types = compile::compile_types(&schema);

    let mut enhanced = Vec::new();
    for decl in &types {
        match qbx_enhancer::enhance(decl, &schema, &types) {
            Ok(enhancement) => {
                for warning in &enhancement.warnings {
                    eprintln!("warning: {warning}");
                }
                enhanced.push(enhancement.type_decl);
            }
            Err(error) => {
                eprintln!("error: {error}");
                std::process::exit(1);
            }
        }
    }

    let rst = emit::emit_rust(&enhanced);
    print!("{rst}");
}

fn read_input(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        reqwest::blocking::get(input).unwrap().text().unwrap()
    } else {
        std::fs::read_to_string(input).unwrap()
    }
}
