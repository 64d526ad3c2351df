//! MADS source emission helpers.

use std::io::{self, Write};

/// Bytes per `.byte` row in data listings.
pub const BYTES_PER_ROW: usize = 20;

/// Format bytes as a single `.byte $xx,$yy,...` directive.
pub fn byte_directive(bytes: &[u8]) -> String {
    let values: Vec<String> = bytes.iter().map(|b| format!("${b:02x}")).collect();
    format!(".byte {}", values.join(","))
}

/// Split `data` into `.byte` directives of at most `per_row` values.
pub fn byte_rows(data: &[u8], per_row: usize) -> impl Iterator<Item = String> + '_ {
    data.chunks(per_row.max(1)).map(byte_directive)
}

/// Write `data` as indented `.byte` rows.
pub fn write_byte_rows<W: Write>(writer: &mut W, data: &[u8], per_row: usize) -> io::Result<()> {
    for row in byte_rows(data, per_row) {
        writeln!(writer, "\t\t{row}")?;
    }
    Ok(())
}
