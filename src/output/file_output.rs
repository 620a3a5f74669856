//! Per-domain text file output
//!
//! Each domain gets `<directory>/<domain with '.' replaced by '_'>.<extension>`
//! containing one address per line.

use crate::config::OutputConfig;
use crate::output::traits::{EmailSink, OutputError, OutputResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Derives the output file name for a domain
///
/// # Examples
///
/// ```
/// use mail_ripple::output::output_file_name;
///
/// assert_eq!(output_file_name("example.com", "txt"), "example_com.txt");
/// ```
pub fn output_file_name(domain: &str, extension: &str) -> String {
    format!("{}.{}", domain.replace('.', "_"), extension)
}

/// Writes each domain's addresses to its own file
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
    extension: String,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    /// Creates a sink from the output configuration
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.directory, &config.extension)
    }

    /// Full path of the file a domain is written to
    pub fn path_for(&self, domain: &str) -> PathBuf {
        self.directory.join(output_file_name(domain, &self.extension))
    }
}

impl EmailSink for FileSink {
    fn write_emails(&self, domain: &str, emails: &HashSet<String>) -> OutputResult<PathBuf> {
        let path = self.path_for(domain);

        // Sorted so reruns over a static site produce identical files
        let mut sorted: Vec<&String> = emails.iter().collect();
        sorted.sort();

        let write = || -> std::io::Result<()> {
            let mut writer = BufWriter::new(File::create(&path)?);
            for email in sorted {
                writeln!(writer, "{}", email)?;
            }
            writer.flush()
        };

        write().map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
