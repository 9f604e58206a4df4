//! Atomic write operations for GraphML files.
//!
//! Output goes to a sibling temporary file first, which is then renamed over
//! the target. Renames within one filesystem are atomic on POSIX systems, so
//! an interrupted run never leaves a half-written graph behind.
//!
//! # Examples
//!
//! ```no_run
//! use incgraph_graphml::{GraphDocument, write_graphml_atomic};
//!
//! let doc = GraphDocument::directed();
//! write_graphml_atomic("annotated.graphml", &doc)?;
//! # Ok::<(), incgraph_graphml::Error>(())
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{GraphDocument, GraphMlWriter, Result};

/// Atomically writes a document to a GraphML file.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written, or
/// if the final rename fails (e.g. cross-filesystem move). On failure the
/// original file, if any, is left unchanged and the temporary file is removed
/// on a best-effort basis.
pub fn write_graphml_atomic(path: impl AsRef<Path>, doc: &GraphDocument) -> Result<()> {
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, doc) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    std::fs::rename(&temp_path, path)?;
    debug!(
        path = %path.display(),
        nodes = doc.nodes.len(),
        edges = doc.edges.len(),
        "Wrote GraphML"
    );
    Ok(())
}

/// `graph.graphml` becomes `graph.graphml.tmp`; a path without an extension
/// gets `.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

fn write_to_temp_file(temp_path: &Path, doc: &GraphDocument) -> Result<()> {
    let file = File::create(temp_path)?;
    GraphMlWriter::write_document(doc, BufWriter::new(file))
}
