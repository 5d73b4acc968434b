pub mod file;
pub mod stdin;

use breakeven_core::analysis::BreakEvenInput;

/// Load analysis input from `--input <path>`, falling back to piped stdin.
pub fn load_input(path: Option<&str>) -> Result<BreakEvenInput, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        file::read_input(path)
    } else if let Some(input) = stdin::read_stdin()? {
        Ok(input)
    } else {
        Err("--input <file.json|file.yaml> or data on stdin required".into())
    }
}
