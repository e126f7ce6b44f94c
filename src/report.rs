use std::io::Write;

use serde::Deserialize;

use crate::align::AlignedRecord;
use crate::error::CompareResult;

/// Width the text labels are padded to before the `": "` separator.
pub const LABEL_WIDTH: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Labelled block per record, blank line between blocks
    #[default]
    Text,
    /// One JSON object per record (JSON Lines)
    Json,
}

pub struct ReportWriter<W: Write> {
    out: W,
    format: ReportFormat,
    written: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    pub fn write_record(&mut self, record: &AlignedRecord<'_>) -> CompareResult<()> {
        match self.format {
            ReportFormat::Text => {
                for (role, text) in record.fields() {
                    writeln!(self.out, "{:<width$}: {}", role.label(), text, width = LABEL_WIDTH)?;
                }
                writeln!(self.out)?;
            }
            ReportFormat::Json => {
                serde_json::to_writer(&mut self.out, record).map_err(std::io::Error::from)?;
                writeln!(self.out)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Flushes the sink and returns the record count.
    pub fn finish(mut self) -> CompareResult<usize> {
        self.out.flush()?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportFormat, ReportWriter};
    use crate::align::AlignedRecord;

    fn hola() -> AlignedRecord<'static> {
        AlignedRecord {
            index: 0,
            original: "Hola",
            human: "Hello",
            mmt: "Hi",
            gt: "Hey",
        }
    }

    fn render(format: ReportFormat, records: &[AlignedRecord<'_>]) -> String {
        let mut buf: Vec<u8> = Vec::new();
        let mut writer = ReportWriter::new(&mut buf, format);
        for r in records {
            writer.write_record(r).expect("write record");
        }
        assert_eq!(writer.finish().expect("finish"), records.len());
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn text_block_has_padded_labels_and_blank_line() {
        let out = render(ReportFormat::Text, &[hola()]);
        assert_eq!(
            out,
            "ORIGINAL: Hola\nHUMAN   : Hello\nMMT     : Hi\nGT      : Hey\n\n"
        );
    }

    #[test]
    fn empty_lines_keep_their_label() {
        let record = AlignedRecord {
            index: 3,
            original: "",
            human: "",
            mmt: "",
            gt: "",
        };
        let out = render(ReportFormat::Text, &[record]);
        assert_eq!(out, "ORIGINAL: \nHUMAN   : \nMMT     : \nGT      : \n\n");
    }

    #[test]
    fn json_lines_parse_back() {
        let mut second = hola();
        second.index = 1;
        second.gt = "tab\there \"quoted\"";
        let out = render(ReportFormat::Json, &[hola(), second]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let v: serde_json::Value = serde_json::from_str(lines[1]).expect("json");
        assert_eq!(v["index"], 1);
        assert_eq!(v["original"], "Hola");
        assert_eq!(v["human"], "Hello");
        assert_eq!(v["mmt"], "Hi");
        assert_eq!(v["gt"], "tab\there \"quoted\"");
    }

    #[test]
    fn format_names_parse_from_toml() {
        #[derive(serde::Deserialize)]
        struct Holder {
            format: ReportFormat,
        }
        let h: Holder = toml::from_str("format = \"json\"").expect("toml");
        assert_eq!(h.format, ReportFormat::Json);
    }
}
