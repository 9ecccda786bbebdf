//! Named-mutex guard so only one engine runs per session.

use anyhow::bail;
use tracing::debug;
use windows::Win32::Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, FALSE, GetLastError, HANDLE};
use windows::Win32::System::Threading::CreateMutexW;
use windows::core::w;

/// Holds the instance mutex for the process lifetime.
pub struct SingleInstance {
    mutex: HANDLE,
}

// mutex handles may be closed from any thread
unsafe impl Send for SingleInstance {}

impl SingleInstance {
    /// Claims the instance mutex, failing if another process already holds it.
    pub fn acquire() -> anyhow::Result<SingleInstance> {
        let mutex = unsafe { CreateMutexW(None, FALSE, w!("wincycle-instance")) }?;
        if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
            unsafe {
                let _ = CloseHandle(mutex);
            }
            bail!("another instance is already running");
        }
        debug!("instance mutex claimed");
        Ok(SingleInstance { mutex })
    }
}

impl Drop for SingleInstance {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.mutex);
        }
    }
}
