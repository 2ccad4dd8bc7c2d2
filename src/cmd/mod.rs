pub mod corpus;
pub mod mask;
pub mod pace;
pub mod score;
pub mod tokenize;

use reader::error::ReaderResult;
use std::fs;
use std::path::Path;

pub fn read_input(path: &Path) -> ReaderResult<String> {
    Ok(fs::read_to_string(path)?)
}
