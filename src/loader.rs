use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use csv::StringRecord;
use thiserror::Error;
use tracing::debug;

use crate::record::Record;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} not found", path.display())]
    MissingInput { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Read every row of the CSV file at `path`.
///
/// The file is read to the end and closed before this returns.
pub fn load(path: &Path) -> Result<Vec<Record>, LoadError> {
    let mut file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::MissingInput {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    drop(file);

    let records = parse(content.as_bytes())?;
    debug!(path = %path.display(), rows = records.len(), "loaded publications table");
    Ok(records)
}

/// Parse CSV data whose header row names the record fields.
///
/// Header names and values are trimmed. Rows may be shorter or longer than
/// the header; absent cells read as empty. When a column name repeats, the
/// rightmost column wins.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::new(reader.headers()?);
    let mut records = Vec::new();
    for row in reader.records() {
        let row = columns.project(&row?);
        records.push(row.deserialize::<Record>(Some(&columns.names))?);
    }
    Ok(records)
}

/// The header row with repeated names folded onto their last position.
struct Columns {
    names: StringRecord,
    positions: Vec<usize>,
}

impl Columns {
    fn new(header: &StringRecord) -> Self {
        let mut names = StringRecord::new();
        let mut positions: Vec<usize> = Vec::new();
        for (i, name) in header.iter().enumerate() {
            match names.iter().position(|n| n == name) {
                Some(slot) => positions[slot] = i,
                None => {
                    names.push_field(name);
                    positions.push(i);
                }
            }
        }
        Columns { names, positions }
    }

    /// One cell per distinct column, padding short rows with empty cells and
    /// dropping cells past the header.
    fn project(&self, row: &StringRecord) -> StringRecord {
        self.positions
            .iter()
            .map(|&i| row.get(i).unwrap_or(""))
            .collect()
    }
}
