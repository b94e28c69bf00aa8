//! Model files and presolve, delegated to a backend.

use std::path::Path;

use crate::solver::{ModelFile, Presolve};

use super::{Model, ModelError};

impl Model {
    /// Compile if stale and write the result to `path` through `backend`.
    pub fn write<W>(&mut self, backend: &mut W, path: impl AsRef<Path>) -> Result<(), ModelError>
    where
        W: ModelFile + ?Sized,
    {
        let path = path.as_ref();
        let compiled = self.update();
        backend.write_model(compiled, path)?;
        tracing::debug!(
            component = "model",
            operation = "write",
            status = "success",
            path = %path.display(),
            rows = compiled.num_row,
            cols = compiled.num_col,
            "Wrote model file"
        );
        Ok(())
    }

    /// Load a model file through `backend` and rebuild records from it.
    ///
    /// Rows must each carry one relation; a file with ranged or free rows
    /// fails with [`ModelError::InvalidCompiledModel`].
    pub fn read<R>(backend: &mut R, path: impl AsRef<Path>) -> Result<Model, ModelError>
    where
        R: ModelFile + ?Sized,
    {
        let path = path.as_ref();
        let compiled = backend.read_model(path)?;
        let model = Model::from_compiled(&compiled)?;
        tracing::debug!(
            component = "model",
            operation = "read",
            status = "success",
            path = %path.display(),
            rows = compiled.num_row,
            cols = compiled.num_col,
            "Read model file"
        );
        Ok(model)
    }

    /// Presolve the current model and return the reduced problem as a new model.
    ///
    /// Ranged rows in the reduced problem are split in two and free rows are
    /// dropped before the records are rebuilt. `self` keeps its records.
    pub fn presolve<P>(&mut self, backend: &mut P) -> Result<Model, ModelError>
    where
        P: Presolve + ?Sized,
    {
        let compiled = self.update();
        let (rows, cols) = (compiled.num_row, compiled.num_col);
        let reduced = backend.presolve(compiled)?.split_ranged_rows();
        let model = Model::from_compiled(&reduced)?;
        tracing::debug!(
            component = "model",
            operation = "presolve",
            status = "success",
            rows_before = rows,
            cols_before = cols,
            rows_after = reduced.num_row,
            cols_after = reduced.num_col,
            "Presolved model"
        );
        Ok(model)
    }
}
