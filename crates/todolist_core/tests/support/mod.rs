use std::cell::Cell;
use todolist_core::db::DbError;
use todolist_core::{KvRepository, RepoError, RepoResult};

/// Key-value wrapper whose writes can be switched to fail.
pub struct FlakyKv<R> {
    inner: R,
    fail_writes: Cell<bool>,
}

impl<R: KvRepository> FlakyKv<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            fail_writes: Cell::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn write_error() -> RepoError {
        RepoError::Db(DbError::Io(std::io::Error::other("disk full")))
    }
}

impl<R: KvRepository> KvRepository for FlakyKv<R> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(Self::write_error());
        }
        self.inner.put(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        if self.fail_writes.get() {
            return Err(Self::write_error());
        }
        self.inner.remove(key)
    }
}
