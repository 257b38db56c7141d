use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Escribe `contents` en `path` sin dejar nunca un archivo a medias.
///
/// Se escribe primero a un temporal hermano (con el pid en el nombre, por si
/// hay varios workers compartiendo directorio) y luego se renombra encima.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = path.with_extension(format!("{}.tmp", std::process::id()));

  let written = (|| {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
    fs::rename(&tmp_path, path)
  })();

  if written.is_err() {
    let _ = fs::remove_file(&tmp_path);
  }

  written
}
