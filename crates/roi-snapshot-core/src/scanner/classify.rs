use crate::model::{FileKind, Objective, OutputFile};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `<client>[_<objective>]_<kind>_<YYYYMMDD_HHMMSS>.<ext>`
    ///
    /// The client group is lazy so a trailing objective segment binds to the
    /// objective group instead of being swallowed into the client id.
    static ref OUTPUT_FILE_NAME: Regex = Regex::new(
        r"(?i)^([a-z0-9_]+?)(?:_(pipeline|revenue|roas|cac))?_(summary|recommendation)_(\d{8}_\d{6})\.(json|csv)$"
    )
    .unwrap();
}

/// Parse an optimizer output file name. Names outside the grammar yield `None`.
pub fn classify(file_name: &str) -> Option<OutputFile> {
    let caps = OUTPUT_FILE_NAME.captures(file_name)?;

    let client_id = caps.get(1)?.as_str().to_lowercase();
    let objective = match caps.get(2) {
        Some(m) => m.as_str().parse::<Objective>().ok()?,
        None => Objective::default(),
    };
    let kind = caps.get(3)?.as_str().parse::<FileKind>().ok()?;
    let timestamp = caps.get(4)?.as_str().to_string();

    Some(OutputFile {
        file_name: file_name.to_string(),
        client_id,
        objective,
        kind,
        timestamp,
    })
}
