use std::error;
use std::ffi::OsString;
use std::fmt;

/// An environment variable override that was present but unusable.
#[derive(Debug)]
pub(crate) struct VarError {
    pub(crate) var: &'static str,
    pub(crate) val: OsString,
    pub(crate) reason: VarErrorReason,
}

#[derive(Debug)]
pub(crate) enum VarErrorReason {
    NotUnicode,
    Unparseable,
}

impl VarError {
    pub(crate) const fn not_unicode(var: &'static str, val: OsString) -> Self {
        Self {
            var,
            val,
            reason: VarErrorReason::NotUnicode,
        }
    }

    pub(crate) const fn unparseable(var: &'static str, val: OsString) -> Self {
        Self {
            var,
            val,
            reason: VarErrorReason::Unparseable,
        }
    }
}

impl fmt::Display for VarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            VarErrorReason::NotUnicode => write!(f, "{} is not valid utf8: {:?}", self.var, self.val),
            VarErrorReason::Unparseable => write!(f, "{} could not be parsed: {:?}", self.var, self.val),
        }
    }
}

impl error::Error for VarError {}
