use super::error::Error;
use super::geojson::Feature;
use serde_json::to_string;
use std::io::Write;

/// Writes documents as `- <json>` report lines.
pub trait Output {
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Error>;
}

impl Output for [Feature] {
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Error> {
        for feature in self.iter() {
            let json = to_string(feature)?;
            writeln!(writer, "- {}", json)?;
        }
        Ok(())
    }
}

impl Output for Option<Feature> {
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Error> {
        // an absent match still gets a line
        let json = to_string(self)?;
        writeln!(writer, "- {}", json)?;
        Ok(())
    }
}
