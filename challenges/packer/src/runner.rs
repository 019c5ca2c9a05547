use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::Semaphore;
use tokio::task::{self, JoinHandle};

use crate::parser::{self, Limits};
use crate::selection::Selection;
use crate::solver::solve;
use crate::{decode_line, Error, Result, Writer};

/// Solve every problem in the file at `path`, up to `jobs` at a time.
///
/// The output is the same as the one of `pack_with`: one line per problem, in input order.
pub async fn pack_concurrent(path: impl AsRef<Path>, jobs: usize, limits: Limits) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).await.map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!("packing {} with {} workers", path.display(), jobs.max(1));
    pack_stream(BufReader::new(file), jobs, limits).await
}

/// Solve every problem read from `reader`, up to `jobs` at a time.
///
/// Lines are parsed as they arrive. Each instance is solved on the blocking pool once a permit
/// is free; a permit is held for as long as its board is alive, so at most `jobs` boards exist
/// at any time. Results are collected in the order the lines were read.
///
/// If reading fails part way, solves that have not started are cancelled and the running ones
/// are waited for before the error is returned.
pub async fn pack_stream<R: AsyncBufRead + Unpin>(reader: R, jobs: usize, limits: Limits) -> Result<String> {
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut pending: Vec<JoinHandle<Selection>> = Vec::new();

    if let Err(err) = dispatch(reader, &permits, &limits, &mut pending).await {
        warn!("input failed, cancelling {} pending solves", pending.len());
        for handle in &pending {
            handle.abort();
        }
        for handle in pending {
            let _ = handle.await;
        }
        return Err(err);
    }

    let mut out = Writer::new();
    for handle in pending {
        out.println(handle.await?);
    }
    Ok(out.into_string())
}

async fn dispatch<R: AsyncBufRead + Unpin>(
    reader: R,
    permits: &Arc<Semaphore>,
    limits: &Limits,
    pending: &mut Vec<JoinHandle<Selection>>,
) -> Result<()> {
    let mut segments = reader.split(b'\n');
    let mut line_no = 0;

    while let Some(bytes) = segments.next_segment().await? {
        line_no += 1;
        let Some(line) = decode_line(line_no, bytes) else {
            continue;
        };
        let Some(instance) = parser::parse_logged(line_no, &line, limits) else {
            continue;
        };
        let permit = permits.clone().acquire_owned().await?;
        pending.push(task::spawn_blocking(move || {
            let _permit = permit;
            solve(&instance)
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

    use super::*;
    use crate::pack_str;

    const INPUT: &str = "81 : (1,53.38,€45) (2,88.62,€98) (3,78.48,€3) (4,72.30,€76) (5,30.18,€9) (6,46.34,€48)
8 : (1,15.3,€34)
bad line
75 : (1,85.31,€29) (2,14.55,€74) (3,3.98,€16) (4,26.24,€55) (5,63.69,€52) (6,76.25,€75) (7,60.02,€74) (8,93.18,€35) (9,89.95,€78)
56 : (1,90.72,€13) (2,33.80,€40) (3,43.15,€10) (4,37.97,€16) (5,46.81,€36) (6,48.77,€79) (7,81.80,€45) (8,19.36,€79) (9,6.76,€64)
0 : (1,1,€1)";

    #[tokio::test]
    async fn test_pack_stream() -> Result<()> {
        let out = pack_stream(Cursor::new(INPUT), 4, Limits::default()).await?;
        assert_eq!(out, "4\n-\n2,7\n8,9\n-");
        Ok(())
    }

    #[tokio::test]
    async fn test_same_output_for_any_worker_count() -> Result<()> {
        let expected = pack_str(INPUT, &Limits::default());
        for jobs in [0, 1, 2, 16] {
            let out = pack_stream(Cursor::new(INPUT), jobs, Limits::default()).await?;
            assert_eq!(out, expected, "jobs={}", jobs);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file() {
        let res = pack_concurrent("does/not/exist.txt", 2, Limits::default()).await;
        assert!(matches!(res, Err(Error::Read { .. })));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() -> Result<()> {
        let raw: &[u8] = b"8 : (1,15.3,34)\n\xff\xfe junk\n81 : (4,72.30,76)\r\n";
        let out = pack_stream(Cursor::new(raw), 2, Limits::default()).await?;
        assert_eq!(out, "-\n4");
        Ok(())
    }

    /// A source that fails on every read.
    struct Unreadable;

    impl AsyncRead for Unreadable {
        fn poll_read(self: Pin<&mut Self>, _: &mut Context<'_>, _: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::other("device gone")))
        }
    }

    #[tokio::test]
    async fn test_read_failure_after_some_lines() {
        let source = Cursor::new(INPUT.as_bytes()).chain(Unreadable);
        let res = pack_stream(BufReader::new(source), 2, Limits::default()).await;
        match res {
            Err(Error::Io(err)) => assert_eq!(err.to_string(), "device gone"),
            other => panic!("expected an input error, got {:?}", other),
        }
    }
}
