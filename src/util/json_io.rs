
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Returns true if the filename looks like a gzip-compressed file.
/// Both ".gz" and ".bgz" show up in our input datasets.
pub fn is_gzipped(filename: &Path) -> bool {
    let extension = filename.extension().unwrap_or_default();
    extension == "gz" || extension == "bgz"
}

/// Opens a buffered, gzip-transparent text reader for the given file.
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open properly
pub fn open_text_reader(filename: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn BufRead> = if is_gzipped(filename) {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// Helper function that loads a JSON file into some type, helpful generic
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> anyhow::Result<T> {
    let fp = open_text_reader(filename)?;
    let result: T = serde_json::from_reader(fp)
        .with_context(|| format!("Error while deserializing {filename:?}:"))?;
    Ok(result)
}

/// This will save a generic serializable struct to JSON.
/// # Arguments
/// * `data` - the data in memory
/// * `out_filename` - user provided path to write to
/// # Errors
/// * if opening or writing to the file throw errors
/// * if JSON serialization throws errors
pub fn save_json<T: serde::Serialize>(data: &T, out_filename: &Path) -> anyhow::Result<()> {
    let file: Box<dyn std::io::Write> = if is_gzipped(out_filename) {
        Box::new(
            flate2::write::GzEncoder::new(
                File::create(out_filename)?,
                flate2::Compression::best()
            )
        )
    } else {
        Box::new(File::create(out_filename)?)
    };
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .with_context(|| format!("Error while serializing {out_filename:?}:"))?;
    writer.flush()
        .with_context(|| format!("Error while flushing output to {out_filename:?}:"))?;
    Ok(())
}

/// Lazy reader for newline-delimited JSON files, one deserialized record per line.
/// The underlying file is consumed as a stream, so sources larger than memory are fine.
/// Empty lines are skipped.
pub struct JsonLinesReader<T: serde::de::DeserializeOwned> {
    /// Source filename, retained for error messages
    filename: PathBuf,
    /// Line iterator over the (possibly decompressed) file
    lines: std::io::Lines<Box<dyn BufRead>>,
    /// Current line number, for error messages
    line_number: usize,
    /// Target record type
    record_type: PhantomData<T>
}

impl<T: serde::de::DeserializeOwned> JsonLinesReader<T> {
    /// Opens a new line-delimited JSON reader.
    /// # Arguments
    /// * `filename` - the file path to open, optionally gzip-compressed
    /// # Errors
    /// * if the file does not open properly
    pub fn new(filename: &Path) -> anyhow::Result<Self> {
        let reader = open_text_reader(filename)?;
        Ok(Self {
            filename: filename.to_path_buf(),
            lines: reader.lines(),
            line_number: 0,
            record_type: PhantomData
        })
    }
}

impl<T: serde::de::DeserializeOwned> Iterator for JsonLinesReader<T> {
    type Item = anyhow::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => {
                    return Some(Err(anyhow::Error::new(e)
                        .context(format!("Error while reading {:?}:", self.filename))));
                }
            };
            self.line_number += 1;
            if line.is_empty() {
                continue;
            }

            let parsed = serde_json::from_str(&line)
                .with_context(|| format!("Error while deserializing line {} of {:?}:", self.line_number, self.filename));
            return Some(parsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("truth_set.json.gz")));
        assert!(is_gzipped(Path::new("annotations.tsv.bgz")));
        assert!(!is_gzipped(Path::new("annotations.tsv")));
        assert!(!is_gzipped(Path::new("no_extension")));
    }
}
