//! Extended file attributes.

use std::{ffi::CStr, io};

/// Maximum size handled for a single extended attribute value.
///
/// Large enough for any digest this crate family stores; callers that need
/// more should call [`getxattr`] in a loop with a bigger buffer themselves.
const MAX_VALUE_LEN: usize = 256;

/// Call getxattr(2) with the given arguments.
///
/// Returns [`None`] if the attribute does not exist
/// (`ENODATA`/`ENOATTR`), rather than an error -
/// callers that need to distinguish "absent" from "other I/O error"
/// should match on [`io::ErrorKind::NotFound`] themselves; this wrapper
/// already folds the attribute-specific errno into that kind.
pub fn getxattr(pathname: &CStr, name: &CStr) -> io::Result<Option<Vec<u8>>>
{
    let mut buf: Vec<u8> = vec![0; MAX_VALUE_LEN];

    // SAFETY: pathname and name are NUL-terminated, buf has buf.len() bytes.
    let len = unsafe {
        libc::getxattr(
            pathname.as_ptr(),
            name.as_ptr(),
            buf.as_mut_ptr() as *mut libc::c_void,
            buf.len(),
        )
    };

    if len == -1 {
        let err = io::Error::last_os_error();
        return match err.raw_os_error() {
            Some(libc::ENODATA) => Ok(None),
            _                   => Err(err),
        };
    }

    // SAFETY: getxattr(2) wrote this many bytes.
    buf.truncate(len as usize);
    Ok(Some(buf))
}

/// Call setxattr(2) with the given arguments, replacing any existing value.
pub fn setxattr(pathname: &CStr, name: &CStr, value: &[u8]) -> io::Result<()>
{
    // SAFETY: pathname and name are NUL-terminated, value has value.len() bytes.
    let result = unsafe {
        libc::setxattr(
            pathname.as_ptr(),
            name.as_ptr(),
            value.as_ptr() as *const libc::c_void,
            value.len(),
            0,
        )
    };

    if result == -1 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}
