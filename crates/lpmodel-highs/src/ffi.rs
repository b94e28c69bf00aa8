//! Direct calls into the HiGHS C API.
//!
//! The `highs` crate covers building and solving; info queries, model files
//! and presolve are only reachable through `highs-sys`, so every unsafe
//! block of the crate lives here.
#![allow(unsafe_code)]

use std::ffi::{CStr, CString, c_char, c_void};
use std::path::Path;

use highs::SolvedModel;
use highs_sys::HighsInt;
use lpmodel_core::{CompiledModel, RowMatrix, Sense};
use tracing::{debug, warn};

use crate::error::HighsError;
use crate::problem::{OptionValue, check_lengths, is_integer, merged_matrix};

const STATUS_WARNING: HighsInt = 1;
const MATRIX_FORMAT_ROW_WISE: HighsInt = 2;
const OBJ_SENSE_MINIMIZE: HighsInt = 1;
const OBJ_SENSE_MAXIMIZE: HighsInt = -1;
const VAR_TYPE_CONTINUOUS: HighsInt = 0;
const VAR_TYPE_INTEGER: HighsInt = 1;
/// `kHighsMaximumStringLength`, the buffer size name getters write into.
const NAME_BUFFER_LEN: usize = 512;

/// Integer info of a solved model, `None` if HiGHS does not report it.
pub(crate) fn int_info(solved: &SolvedModel, name: &str) -> Option<u64> {
    let c_name = CString::new(name).ok()?;
    let mut value: HighsInt = 0;
    let status = unsafe {
        highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
    };
    if status != highs_sys::STATUS_OK {
        debug!(
            component = "highs",
            operation = "int_info",
            status = "skipped",
            info = name,
            status_code = status,
            "Info value not available"
        );
        return None;
    }
    u64::try_from(value).ok()
}

/// Version string of the linked HiGHS library.
pub fn highs_version() -> Option<String> {
    let ptr = unsafe { highs_sys::Highs_version() };
    if ptr.is_null() {
        return None;
    }
    let version = unsafe { CStr::from_ptr(ptr) };
    version.to_str().ok().map(str::to_string)
}

fn check(call: &'static str, status: HighsInt) -> Result<(), HighsError> {
    if status == highs_sys::STATUS_OK || status == STATUS_WARNING {
        Ok(())
    } else {
        Err(HighsError::Call { call, status })
    }
}

fn to_int(what: &'static str, value: usize) -> Result<HighsInt, HighsError> {
    HighsInt::try_from(value).map_err(|_| HighsError::TooLarge { what, value })
}

fn to_ints(what: &'static str, values: &[usize]) -> Result<Vec<HighsInt>, HighsError> {
    values.iter().map(|&value| to_int(what, value)).collect()
}

/// Counts come back as `HighsInt`; a negative one would be a HiGHS bug.
fn from_int(call: &'static str, value: HighsInt) -> Result<usize, HighsError> {
    usize::try_from(value).map_err(|_| HighsError::Call {
        call,
        status: value,
    })
}

fn c_string(what: &'static str, text: &str) -> Result<CString, HighsError> {
    CString::new(text).map_err(|_| HighsError::NulInString { what })
}

fn c_path(path: &Path) -> Result<CString, HighsError> {
    CString::new(path.as_os_str().as_encoded_bytes())
        .map_err(|_| HighsError::NulInString { what: "path" })
}

#[derive(Clone, Copy)]
enum LpSource {
    Incumbent,
    Presolved,
}

#[derive(Clone, Copy)]
enum NameKind {
    Column,
    Row,
}

/// Owned `Highs` instance from `Highs_create`, destroyed on drop.
pub(crate) struct RawHighs {
    ptr: *mut c_void,
}

impl RawHighs {
    pub fn new() -> Result<Self, HighsError> {
        let ptr = unsafe { highs_sys::Highs_create() };
        if ptr.is_null() {
            return Err(HighsError::Call {
                call: "Highs_create",
                status: -1,
            });
        }
        Ok(Self { ptr })
    }

    pub fn set_option(
        &mut self,
        name: &'static str,
        value: OptionValue,
    ) -> Result<(), HighsError> {
        let c_name = c_string("option name", name)?;
        let option = c_name.as_ptr();
        let status = match value {
            OptionValue::Bool(flag) => unsafe {
                highs_sys::Highs_setBoolOptionValue(self.ptr, option, HighsInt::from(flag))
            },
            OptionValue::Int(number) => unsafe {
                highs_sys::Highs_setIntOptionValue(self.ptr, option, number)
            },
            OptionValue::Float(number) => unsafe {
                highs_sys::Highs_setDoubleOptionValue(self.ptr, option, number)
            },
            OptionValue::Str(text) => {
                let c_text = c_string("option value", text)?;
                unsafe { highs_sys::Highs_setStringOptionValue(self.ptr, option, c_text.as_ptr()) }
            }
        };
        check(name, status)
    }

    /// Replace the instance's model with `model`, names included.
    pub fn pass_model(&mut self, model: &CompiledModel) -> Result<(), HighsError> {
        check_lengths(model)?;
        let (matrix, _) = merged_matrix(model)?;
        let num_col = to_int("column count", model.num_col)?;
        let num_row = to_int("row count", model.num_row)?;
        let num_nz = to_int("nonzero count", matrix.nnz())?;
        let start = to_ints("matrix offset", &matrix.start)?;
        let index = to_ints("column index", &matrix.index)?;
        let sense = match model.sense {
            Sense::Minimize => OBJ_SENSE_MINIMIZE,
            Sense::Maximize => OBJ_SENSE_MAXIMIZE,
        };

        let status = if model.is_mip() {
            let integrality: Vec<HighsInt> = (0..model.num_col)
                .map(|col| {
                    if is_integer(model, col) {
                        VAR_TYPE_INTEGER
                    } else {
                        VAR_TYPE_CONTINUOUS
                    }
                })
                .collect();
            unsafe {
                highs_sys::Highs_passMip(
                    self.ptr,
                    num_col,
                    num_row,
                    num_nz,
                    MATRIX_FORMAT_ROW_WISE,
                    sense,
                    model.offset,
                    model.col_cost.as_ptr(),
                    model.col_lower.as_ptr(),
                    model.col_upper.as_ptr(),
                    model.row_lower.as_ptr(),
                    model.row_upper.as_ptr(),
                    start.as_ptr(),
                    index.as_ptr(),
                    matrix.value.as_ptr(),
                    integrality.as_ptr(),
                )
            }
        } else {
            unsafe {
                highs_sys::Highs_passLp(
                    self.ptr,
                    num_col,
                    num_row,
                    num_nz,
                    MATRIX_FORMAT_ROW_WISE,
                    sense,
                    model.offset,
                    model.col_cost.as_ptr(),
                    model.col_lower.as_ptr(),
                    model.col_upper.as_ptr(),
                    model.row_lower.as_ptr(),
                    model.row_upper.as_ptr(),
                    start.as_ptr(),
                    index.as_ptr(),
                    matrix.value.as_ptr(),
                )
            }
        };
        let call = if model.is_mip() {
            "Highs_passMip"
        } else {
            "Highs_passLp"
        };
        check(call, status)?;

        for (col, name) in model.col_names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let (col, c_name) = (to_int("column", col)?, c_string("column name", name)?);
            let status = unsafe { highs_sys::Highs_passColName(self.ptr, col, c_name.as_ptr()) };
            check("Highs_passColName", status)?;
        }
        for (row, name) in model.row_names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let (row, c_name) = (to_int("row", row)?, c_string("row name", name)?);
            let status = unsafe { highs_sys::Highs_passRowName(self.ptr, row, c_name.as_ptr()) };
            check("Highs_passRowName", status)?;
        }
        Ok(())
    }

    /// Format follows the extension (`.mps`, `.lp`, ...).
    pub fn write_model(&mut self, path: &Path) -> Result<(), HighsError> {
        let c_path = c_path(path)?;
        let status = unsafe { highs_sys::Highs_writeModel(self.ptr, c_path.as_ptr()) };
        check("Highs_writeModel", status).map_err(|_| HighsError::File {
            path: path.to_path_buf(),
            call: "Highs_writeModel",
        })
    }

    pub fn read_model(&mut self, path: &Path) -> Result<(), HighsError> {
        let c_path = c_path(path)?;
        let status = unsafe { highs_sys::Highs_readModel(self.ptr, c_path.as_ptr()) };
        check("Highs_readModel", status).map_err(|_| HighsError::File {
            path: path.to_path_buf(),
            call: "Highs_readModel",
        })
    }

    /// Run presolve only and return the model status it settled on.
    pub fn presolve(&mut self) -> Result<HighsInt, HighsError> {
        let status = unsafe { highs_sys::Highs_presolve(self.ptr) };
        check("Highs_presolve", status)?;
        Ok(unsafe { highs_sys::Highs_getModelStatus(self.ptr) })
    }

    /// The instance's current model, names included.
    pub fn model(&self) -> Result<CompiledModel, HighsError> {
        let mut model = self.read_lp(LpSource::Incumbent)?;
        model.col_names = self.names(NameKind::Column, model.num_col)?;
        model.row_names = self.names(NameKind::Row, model.num_row)?;
        Ok(model)
    }

    /// The reduced model left by [`RawHighs::presolve`]. HiGHS does not
    /// expose its names, so it comes back unnamed.
    pub fn presolved_model(&self) -> Result<CompiledModel, HighsError> {
        self.read_lp(LpSource::Presolved)
    }

    fn read_lp(&self, source: LpSource) -> Result<CompiledModel, HighsError> {
        let (num_col, num_row, num_nz) = unsafe {
            match source {
                LpSource::Incumbent => (
                    highs_sys::Highs_getNumCol(self.ptr),
                    highs_sys::Highs_getNumRow(self.ptr),
                    highs_sys::Highs_getNumNz(self.ptr),
                ),
                LpSource::Presolved => (
                    highs_sys::Highs_getPresolvedNumCol(self.ptr),
                    highs_sys::Highs_getPresolvedNumRow(self.ptr),
                    highs_sys::Highs_getPresolvedNumNz(self.ptr),
                ),
            }
        };
        let cols = from_int("Highs_getNumCol", num_col)?;
        let rows = from_int("Highs_getNumRow", num_row)?;
        let nnz = from_int("Highs_getNumNz", num_nz)?;

        let ptr = self.ptr;
        let (mut out_cols, mut out_rows, mut out_nz): (HighsInt, HighsInt, HighsInt) = (0, 0, 0);
        let mut sense: HighsInt = OBJ_SENSE_MINIMIZE;
        let mut offset = 0.0;
        let mut col_cost = vec![0.0; cols];
        let mut col_lower = vec![0.0; cols];
        let mut col_upper = vec![0.0; cols];
        let mut row_lower = vec![0.0; rows];
        let mut row_upper = vec![0.0; rows];
        let mut start: Vec<HighsInt> = vec![0; rows + 1];
        let mut index: Vec<HighsInt> = vec![0; nnz];
        let mut value = vec![0.0; nnz];
        let mut integrality: Vec<HighsInt> = vec![VAR_TYPE_CONTINUOUS; cols];

        macro_rules! get_lp {
            ($call:path) => {
                unsafe {
                    $call(
                        ptr,
                        MATRIX_FORMAT_ROW_WISE,
                        &raw mut out_cols,
                        &raw mut out_rows,
                        &raw mut out_nz,
                        &raw mut sense,
                        &raw mut offset,
                        col_cost.as_mut_ptr(),
                        col_lower.as_mut_ptr(),
                        col_upper.as_mut_ptr(),
                        row_lower.as_mut_ptr(),
                        row_upper.as_mut_ptr(),
                        start.as_mut_ptr(),
                        index.as_mut_ptr(),
                        value.as_mut_ptr(),
                        integrality.as_mut_ptr(),
                    )
                }
            };
        }
        let (call, status) = match source {
            LpSource::Incumbent => ("Highs_getLp", get_lp!(highs_sys::Highs_getLp)),
            LpSource::Presolved => (
                "Highs_getPresolvedLp",
                get_lp!(highs_sys::Highs_getPresolvedLp),
            ),
        };
        check(call, status)?;
        // Row-wise starts come back without the closing offset.
        start[rows] = num_nz;

        let integer: Vec<bool> = integrality
            .iter()
            .map(|&kind| kind == VAR_TYPE_INTEGER)
            .collect();
        let sense = if sense == OBJ_SENSE_MAXIMIZE {
            Sense::Maximize
        } else {
            Sense::Minimize
        };

        Ok(CompiledModel {
            num_col: cols,
            num_row: rows,
            col_lower,
            col_upper,
            integrality: integer.contains(&true).then_some(integer),
            row_lower,
            row_upper,
            matrix: RowMatrix {
                start: start
                    .into_iter()
                    .map(|offset| from_int(call, offset))
                    .collect::<Result<_, _>>()?,
                index: index
                    .into_iter()
                    .map(|col| from_int(call, col))
                    .collect::<Result<_, _>>()?,
                value,
            },
            col_cost,
            offset,
            sense,
            col_names: Vec::new(),
            row_names: Vec::new(),
        })
    }

    /// Names through `Highs_getColName` / `Highs_getRowName`. Entries HiGHS
    /// cannot report come back empty.
    fn names(&self, kind: NameKind, count: usize) -> Result<Vec<String>, HighsError> {
        let mut names = Vec::with_capacity(count);
        let mut buffer = vec![0u8; NAME_BUFFER_LEN];
        for position in 0..count {
            buffer.fill(0);
            let position_int = to_int("name index", position)?;
            let out = buffer.as_mut_ptr().cast::<c_char>();
            let status = unsafe {
                match kind {
                    NameKind::Column => highs_sys::Highs_getColName(self.ptr, position_int, out),
                    NameKind::Row => highs_sys::Highs_getRowName(self.ptr, position_int, out),
                }
            };
            let name = match CStr::from_bytes_until_nul(&buffer) {
                Ok(name) if status == highs_sys::STATUS_OK => name.to_string_lossy().into_owned(),
                _ => {
                    warn!(
                        component = "highs",
                        operation = "read_names",
                        status = "warn",
                        position,
                        status_code = status,
                        "Name not available"
                    );
                    String::new()
                }
            };
            names.push(name);
        }
        Ok(names)
    }
}

impl Drop for RawHighs {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.ptr) };
    }
}
