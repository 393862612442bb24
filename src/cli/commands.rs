//! CLI command implementations

use std::fs;
use std::path::Path;

use sunaba_syntax::{compile, tokenise};

use super::{CliError, CliResult, ExitCode};
use crate::emitter;

/// Read source file contents.
fn read_source(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|err| {
        CliError::failure(format!("Error reading file '{}': {}", path.display(), err))
    })
}

/// Format a front-end diagnostic with the file it came from.
fn diagnostic(path: &Path, err: sunaba_syntax::ParseError) -> CliError {
    CliError::failure(format!("{}: {}", path.display(), err))
}

/// Tokenise and parse a file (the default action).
pub fn check_file(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = compile(&source).map_err(|err| diagnostic(path, err))?;
    println!(
        "{}: {} root statement(s)",
        path.display(),
        program.body.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// Tokenise a file and dump the line tokens as JSON.
pub fn dump_tokens(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let lines = tokenise(&source).map_err(|err| diagnostic(path, err))?;
    let json = serde_json::to_string_pretty(&lines)
        .map_err(|err| CliError::failure(format!("Error serialising tokens: {err}")))?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and dump the AST as JSON.
pub fn dump_ast(path: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = compile(&source).map_err(|err| diagnostic(path, err))?;
    let json = serde_json::to_string_pretty(&program)
        .map_err(|err| CliError::failure(format!("Error serialising AST: {err}")))?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and write the experimental WebAssembly module.
pub fn build_file(path: &Path, output: &Path) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let program = compile(&source).map_err(|err| diagnostic(path, err))?;
    let module = emitter::emit_module(&program);
    fs::write(output, module).map_err(|err| {
        CliError::failure(format!("Error writing '{}': {}", output.display(), err))
    })?;
    println!("Wrote {}", output.display());
    Ok(ExitCode::SUCCESS)
}
