use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole text file into memory.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	fs::read_to_string(filename)
}

/// Returns the corpus name for a file: its stem.
///
/// `corpora/sea.txt` and `sea.txt` both name the corpus `sea`.
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Corpus path has no file name"))?;

	Ok(stem.to_string_lossy().into_owned())
}

/// Resolves the corpus folder given on the command line or by the caller.
///
/// `.` means the working directory; anything else is used as given.
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	match input {
		"." | "./" => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		_ => PathBuf::from(input),
	}
}

/// Lists all files with a given extension directly inside `dir`.
///
/// Returns full paths, sorted so that loading order is stable.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}
