//! The translation pipeline: read → lex → parse → lower → print.
//!
//! Frontend and engine errors are rendered GCC-style
//! (`file:line:col: error: message`) by resolving their spans against the
//! source file; I/O errors carry the offending path.

use anyhow::{bail, Context, Result};
use log::debug;

use crate::common::source::SourceFile;
use crate::frontend::lexer::Lexer;
use crate::frontend::parser::Parser;
use crate::lowering::Lowerer;
use crate::rust_ast::printer;
use super::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read '{}'", cli.input.display()))?;
    let source = SourceFile::new(cli.input.display().to_string(), content);

    let tokens = match Lexer::new(source.content()).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => bail!("{}: error: {}", source.resolve_span(e.span), e),
    };
    debug!("lexed {} tokens", tokens.len());

    let unit = match Parser::new(tokens).parse() {
        Ok(unit) => unit,
        Err(e) => bail!("{}: error: {}", source.resolve_span(e.span), e),
    };
    debug!("parsed {} external declarations", unit.decls.len());

    let items = match Lowerer::new().lower_unit(&unit) {
        Ok(items) => items,
        Err(e) => bail!("{}: error: {}", source.resolve_span(e.span()), e),
    };
    debug!("emitting {} items", items.len());

    let output = printer::print_unit(&items);
    match &cli.output {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("cannot write '{}'", path.display()))?,
        None => print!("{}", output),
    }
    Ok(())
}
