use std::{
    io,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::{debug, error};

use crate::{
    analyze::Error,
    symbols::SymbolTable,
    synthesize::{Program, out::Output},
};

pub mod analyze;
pub mod pass;
pub mod symbols;
pub mod synthesize;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("couldn't read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("couldn't write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("assembly failed: {0}")]
    Assembly(#[from] Error),
}

#[derive(Default)]
pub struct Assembler<O: Output> {
    output: O,
}

impl<O: Output> Assembler<O> {
    /// Assembles the file at `path` and writes the result to `out_path`.
    ///
    /// Diagnostics for assembly errors are printed to stderr. Nothing is written unless the whole
    /// program assembles.
    pub fn assemble(
        &self,
        path: impl AsRef<Path>,
        out_path: impl AsRef<Path>,
    ) -> Result<Program, BuildError> {
        let path = path.as_ref();
        let out_path = out_path.as_ref();

        let source = std::fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_owned(),
            source,
        })?;

        let source_name = Rc::new(
            path.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(String::from("unknown")),
        );

        let program = match self.assemble_source(&source) {
            Ok(program) => program,
            Err(e) => {
                if let Err(io_err) = e.eprint(source_name, &source) {
                    error!(%io_err, "couldn't print diagnostic");
                }
                return Err(e.into());
            }
        };

        debug!(path = %out_path.display(), "writing output");
        self.output
            .write(&program, out_path)
            .map_err(|source| BuildError::Write {
                path: out_path.to_owned(),
                source,
            })?;

        Ok(program)
    }

    /// Runs both passes over `source`.
    pub fn assemble_source(&self, source: &str) -> Result<Program, Error> {
        let mut symbols = SymbolTable::seed();

        let instructions = pass::define_labels(source, &mut symbols)?;
        debug!(instructions, labels = symbols.labels(), "labels collected");

        pass::generate(source, &mut symbols)
    }
}
