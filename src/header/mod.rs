use std::{
    fmt::Write as _,
    fs::{self, Permissions},
    io::{self, BufWriter, ErrorKind, Write},
    path::Path,
};

use tempfile::Builder;

use crate::{
    charset::CodePointSet,
    error::{Error, ResultExt},
    header::source_writer::SourceWriter,
    recipes::Table,
};

pub mod source_writer;

pub const PREAMBLE: &str = "// This is a generated file. Do not edit.";

/// Render a set as a C array initializer: `{0x1680, 0x2000, ...}`.
pub fn serialize(set: &CodePointSet) -> String {
    let mut out = String::from("{");

    for (i, cp) in set.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }

        write!(out, "{cp:#x}").unwrap();
    }

    out.push('}');
    out
}

pub fn emit(writer: &mut SourceWriter<impl Write>, tables: &[Table]) -> io::Result<()> {
    writer.write_nl(PREAMBLE)?;
    writer.write_nl("#pragma once")?;

    for table in tables {
        writer.nl()?;
        writer.write_fmt_nl(format_args!("#define {} \\", table.name.to_uppercase()))?;
        writer.indent();
        writer.write_nl(&serialize(&table.code_points))?;
        writer.dedent();
        writer.nl()?;
    }

    Ok(())
}

pub fn render(tables: &[Table]) -> io::Result<Vec<u8>> {
    let mut writer = SourceWriter::new(Vec::new());
    emit(&mut writer, tables)?;
    Ok(writer.into_inner())
}

/// Permissions for a header that does not exist yet, matching what `fs::write` would create.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    // Narrowed by the umask when the file is created
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Write the header next to `path` and move it into place once it is complete,
/// so a failed run never leaves a truncated header behind.
///
/// A replaced header keeps its permissions. A new one gets the usual permissions
/// for a freshly created file.
pub fn write_atomically(tables: &[Table], path: &Path) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = fs::metadata(path).ok().map(|metadata| metadata.permissions());

    let mut builder = Builder::new();
    if let Some(permissions) = existing.clone().or_else(new_file_permissions) {
        builder.permissions(permissions);
    }

    let mut file = builder.tempfile_in(dir).writing(path)?;

    // The umask applies at creation, so restore the old mode exactly
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions).writing(path)?;
    }

    {
        let mut writer = SourceWriter::new(BufWriter::new(&mut file));
        emit(&mut writer, tables).writing(path)?;
        writer.into_inner().flush().writing(path)?;
    }

    file.persist(path)
        .map_err(|error| error.error)
        .writing(path)?;

    Ok(())
}

/// Whether `path` holds exactly what [`render`] would produce. A missing file is out of date.
pub fn is_up_to_date(tables: &[Table], path: &Path) -> Result<bool, Error> {
    let expected = render(tables).with_path(path)?;

    match fs::read(path) {
        Ok(existing) => Ok(existing == expected),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error).with_path(path),
    }
}
