//! Transaction boundary shared by the services

/// Run `$body` inside one serializable transaction on `$repo`.
///
/// `$tx` is bound to the open transaction for the body. The transaction is
/// committed only when the body returns `Ok`, and rolled back otherwise.
/// When the body or the commit fails with a serialization conflict the
/// whole body is re-run, up to `$repo.max_retries()` extra times.
macro_rules! transactional {
    ($repo:expr, |$tx:ident| $body:expr) => {{
        let repo = &$repo;
        let mut attempt: u32 = 0;
        loop {
            let mut $tx = repo.begin().await?;
            let result: $crate::error::AppResult<_> = async { $body }.await;
            let outcome = match result {
                Ok(value) => $tx
                    .commit()
                    .await
                    .map(|()| value)
                    .map_err($crate::error::AppError::from),
                Err(err) => {
                    // A failed rollback still releases the transaction when the
                    // connection is returned to the pool.
                    let _ = $tx.rollback().await;
                    Err(err)
                }
            };
            match outcome {
                Err(err) if err.is_retryable() && attempt < repo.max_retries() => attempt += 1,
                outcome => break outcome,
            }
        }
    }};
}
