//! Content hashing of preprocessed source (C1).
//!
//! The digest covers what the compiler would actually see, not the raw
//! bytes of the source files: comment-only edits and `-I`-reachable
//! header edits both flow through `cc -E -P` before reaching the hasher.

use {
    crate::error::HashError,
    os_ext::pipe2,
    otter_util::hash::{Hash, Sha1},
    std::{
        fs::File,
        io::Read,
        path::Path,
        process::{Command, Stdio},
    },
};

/// Size of the chunks read from the preprocessor's pipe.
const CHUNK_LEN: usize = 4096;

/// Digest the preprocessed concatenation of `sources`, in order.
///
/// `include_flags` is split on whitespace and passed to `cc -E -P`
/// verbatim, the same tokenisation C2 applies when building `argv`.
pub fn hash_sources(sources: &[impl AsRef<Path>], include_flags: &[String])
    -> Result<Hash, HashError>
{
    let mut hasher = Sha1::new();

    for source in sources {
        preprocess_into(source.as_ref(), include_flags, &mut hasher)?;
    }

    Ok(hasher.finalize())
}

fn preprocess_into(source: &Path, include_flags: &[String], hasher: &mut Sha1)
    -> Result<(), HashError>
{
    let (read_end, write_end) = pipe2(0)
        .map_err(|err| HashError::Spawn{path: source.to_owned(), source: err})?;

    let mut command = Command::new("cc");
    command.arg("-E").arg("-P");
    for flags in include_flags {
        command.args(flags.split_whitespace());
    }
    command.arg(source);
    command.stdout(Stdio::from(write_end));

    let mut child = command.spawn()
        .map_err(|err| HashError::Spawn{path: source.to_owned(), source: err})?;

    // `command` still owns the parent's copy of the write end (spawn
    // only dup'd it into the child); drop it now so the child remains
    // the pipe's only writer and EOF is seen once it exits or closes
    // its stdout. Holding it open past this point would make `reader`
    // block forever even after the child exits.
    drop(command);

    let mut reader = File::from(read_end);
    let mut buf = [0u8; CHUNK_LEN];
    loop {
        let n = reader.read(&mut buf)
            .map_err(|err| HashError::Read{path: source.to_owned(), source: err})?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let status = child.wait()
        .map_err(|err| HashError::Spawn{path: source.to_owned(), source: err})?;
    if !status.success() {
        return Err(HashError::NonZeroExit{path: source.to_owned(), status});
    }

    Ok(())
}

#[cfg(test)]
mod tests
{
    use {super::*, std::{fs, io::Write}};

    #[test]
    fn hashes_are_stable_across_comment_edits()
    {
        if Command::new("cc").arg("--version").output().is_err() {
            eprintln!("skipping: no cc on PATH");
            return;
        }

        let dir = std::env::temp_dir().join(format!(
            "otter-core-hash-test-{}",
            std::process::id(),
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("a.c");

        fs::write(&path, b"int add(int a, int b) { return a + b; }\n").unwrap();
        let h1 = hash_sources(&[&path], &[]).unwrap();

        let mut f = fs::OpenOptions::new().append(true).open(&path).unwrap();
        write!(f, "// just a comment\n").unwrap();
        drop(f);
        let h2 = hash_sources(&[&path], &[]).unwrap();

        assert_eq!(h1, h2);

        fs::write(&path, b"int add(int a, int b) { return a - b; }\n").unwrap();
        let h3 = hash_sources(&[&path], &[]).unwrap();
        assert_ne!(h1, h3);

        fs::remove_dir_all(&dir).ok();
    }
}
