//! Rebuild-avoidance decisions over a target's stored digest (C5).
//!
//! The digest of a successfully built target is stamped onto its output
//! file as an extended attribute, so the cache token travels with the
//! artifact across renames and is atomically replaced when the linker
//! rewrites the file.

use {
    crate::{
        error::CacheError,
        target::{Target, TargetId, TargetKind},
    },
    os_ext::{cstr, getxattr, setxattr, IntoCStr},
    std::io,
};

/// Extended attribute key the stored digest is kept under.
fn xattr_name() -> &'static std::ffi::CStr
{
    cstr!("user.otter-sha1")
}

/// Read the digest stamped on `target`'s output file, if any.
///
/// A missing file, a missing attribute, or a truncated/corrupt value are
/// all reported as `Ok(None)` ("no cache"), never as an ambiguous
/// negative length or an error - there is nothing actionable a caller
/// could do differently for any of those cases, they all just mean
/// "rebuild".
fn stored_digest(target: &Target) -> Result<Option<Vec<u8>>, CacheError>
{
    let pathname = target.name.as_path().into_cstr()
        .map_err(|_| CacheError::Io(
            target.name.clone(),
            io::Error::new(io::ErrorKind::InvalidInput, "path contains a nul"),
        ))?;

    match getxattr(&pathname, xattr_name()) {
        Ok(value)                                          => Ok(value),
        Err(err) if err.kind() == io::ErrorKind::NotFound   => Ok(None),
        Err(err)                                            => Err(CacheError::Io(target.name.clone(), err)),
    }
}

/// Decide whether `target` must be rebuilt.
///
/// See the module documentation for the asymmetry between `Object` and
/// link (`Executable`/`SharedObject`) targets: a link target rebuilds
/// whenever *any* dependency executed this pass, but an `Object` target
/// rebuilds only when its own digest no longer matches what is stored -
/// an `Object`'s dependencies (if it has any at all) do not feed into
/// its compile command, so their having rebuilt carries no information
/// about whether this object's own input changed.
pub fn needs_execute(targets: &[Target], id: TargetId)
    -> Result<bool, CacheError>
{
    let target = &targets[id.0];

    if target.kind != TargetKind::Object {
        if target.dependencies.iter().any(|&dep| targets[dep.0].executed) {
            return Ok(true);
        }
    }

    let stored = match stored_digest(target)? {
        Some(stored) => stored,
        None         => return Ok(true),
    };

    Ok(stored.as_slice() != target.input_digest.0.as_slice())
}

/// Stamp `target`'s current input digest onto its output file.
///
/// Callers must only call this after the target's command has exited
/// with status 0; writing the digest any earlier would let a failed
/// build masquerade as up to date on the next run.
pub fn store(target: &Target) -> Result<(), CacheError>
{
    let pathname = target.name.as_path().into_cstr()
        .map_err(|_| CacheError::Io(
            target.name.clone(),
            io::Error::new(io::ErrorKind::InvalidInput, "path contains a nul"),
        ))?;

    setxattr(&pathname, xattr_name(), &target.input_digest.0)
        .map_err(|err| CacheError::Io(target.name.clone(), err))
}

#[cfg(test)]
mod tests
{
    use {
        super::*,
        otter_util::hash::Hash,
        std::{fs, path::PathBuf},
    };

    fn target_at(name: PathBuf, digest: Hash, dependencies: Vec<TargetId>, kind: TargetKind) -> Target
    {
        Target{
            name,
            kind,
            sources: vec![],
            cc_flags: vec![],
            include_flags: vec![],
            extra_flags: vec![],
            dependencies,
            argv: vec![],
            input_digest: digest,
            executed: false,
        }
    }

    #[test]
    fn missing_file_needs_execute()
    {
        let targets = vec![target_at(
            PathBuf::from("/nonexistent/otter-cache-test-missing"),
            Hash([1; 20]),
            vec![],
            TargetKind::Object,
        )];
        assert!(needs_execute(&targets, TargetId(0)).unwrap());
    }

    #[test]
    fn matching_digest_skips_execute()
    {
        let dir = std::env::temp_dir().join(format!(
            "otter-core-cache-test-{}",
            std::process::id(),
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.o");
        fs::write(&path, b"binary content").unwrap();

        let targets = vec![target_at(path.clone(), Hash([7; 20]), vec![], TargetKind::Object)];
        store(&targets[0]).unwrap();
        assert!(!needs_execute(&targets, TargetId(0)).unwrap());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn link_target_rebuilds_when_dependency_executed()
    {
        let dir = std::env::temp_dir().join(format!(
            "otter-core-cache-test-link-{}",
            std::process::id(),
        ));
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("main");
        fs::write(&out, b"binary content").unwrap();

        let mut dep = target_at(dir.join("util.o"), Hash([2; 20]), vec![], TargetKind::Object);
        dep.executed = true;
        let mut targets = vec![dep];
        let mut link = target_at(out.clone(), Hash([9; 20]), vec![TargetId(0)], TargetKind::Executable);
        store(&link).unwrap();
        link.executed = false;
        targets.push(link);

        // Even though the stored digest on disk matches exactly,
        // the dependency's having executed forces a rebuild.
        assert!(needs_execute(&targets, TargetId(1)).unwrap());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn object_does_not_rebuild_merely_because_dependency_object_rebuilt()
    {
        let dir = std::env::temp_dir().join(format!(
            "otter-core-cache-test-object-asym-{}",
            std::process::id(),
        ));
        fs::create_dir_all(&dir).unwrap();
        let out = dir.join("agg.o");
        fs::write(&out, b"binary content").unwrap();

        let mut dep = target_at(dir.join("other.o"), Hash([2; 20]), vec![], TargetKind::Object);
        dep.executed = true;
        let mut targets = vec![dep];
        let mut agg = target_at(out, Hash([9; 20]), vec![TargetId(0)], TargetKind::Object);
        store(&agg).unwrap();
        agg.executed = false;
        targets.push(agg);

        assert!(!needs_execute(&targets, TargetId(1)).unwrap());

        fs::remove_dir_all(&dir).ok();
    }
}
