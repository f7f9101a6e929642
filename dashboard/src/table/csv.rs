use std::io::Write;

use serde_json::Value;

use super::Table;

fn field(value: &Value) -> String {
    let raw = match value {
        Value::Null => return String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw
    }
}

fn push_record<I>(out: &mut String, values: I)
where
    I: Iterator<Item = String>,
{
    let record: Vec<String> = values.collect();
    out.push_str(&record.join(","));
    out.push_str("\r\n");
}

impl Table {
    /// Renders the table as CSV with a header line. Nulls are empty fields.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_record(
            &mut out,
            self.columns
                .iter()
                .map(|column| field(&Value::String(column.clone()))),
        );
        for row in &self.rows {
            push_record(&mut out, row.iter().map(field));
        }
        out
    }

    pub fn write_csv<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.to_csv().as_bytes())?;
        writer.flush()
    }
}
