pub mod crypt;
pub mod lugs;
pub mod simulate;
pub mod solve;

use m209::config::SearchParams;
use m209::error::M209Result;

/// Search parameters from a JSON file when given, else from the flags.
pub(crate) fn resolve_params(flags: &SearchParams, json: Option<&str>) -> M209Result<SearchParams> {
    match json {
        Some(path) => SearchParams::load_from_file(path),
        None => {
            flags.validate()?;
            Ok(flags.clone())
        }
    }
}
