use crate::config::{SignalCreateConfig, SignalOpenConfig};
use crate::errors::ChannelError;
use nix::errno::Errno;
use std::ffi::CString;
use std::os::raw::c_int;
use std::time::Duration;

/// Outcome of waiting on a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalWait {
    Signaled,
    TimedOut,
}

/// Named binary wait/notify primitive backed by a POSIX semaphore.
///
/// `set` is clamped so the semaphore never counts past one: an already-set
/// signal stays set. With the default auto-reset behavior a successful wait
/// consumes the token, so each `set` wakes at most one waiter; a
/// manual-reset signal re-arms itself after every wait until [`Signal::reset`]
/// drains it.
pub struct Signal {
    sem: *mut libc::sem_t,
    name: CString,
    manual_reset: bool,
    is_owner: bool,
}

unsafe impl Send for Signal {}

impl Signal {
    pub(crate) fn create(name: &str, config: &SignalCreateConfig) -> Result<Self, ChannelError> {
        let c_name = to_sem_name(name)?;

        // A semaphore left behind by a previous owner keeps its old count;
        // recreate it so the configured initial state holds.
        unsafe { libc::sem_unlink(c_name.as_ptr()) };

        let initial = u32::from(config.initially_signaled);
        let sem = unsafe {
            libc::sem_open(
                c_name.as_ptr(),
                libc::O_CREAT | libc::O_EXCL,
                config.mode as libc::mode_t,
                initial,
            )
        };
        if sem == libc::SEM_FAILED {
            return Err(ChannelError::SignalError {
                op: "sem_open",
                errno: Errno::last(),
            });
        }

        tracing::debug!(name, initial, "created signal");
        Ok(Self {
            sem,
            name: c_name,
            manual_reset: config.manual_reset,
            is_owner: true,
        })
    }

    pub(crate) fn open(name: &str, config: &SignalOpenConfig) -> Result<Self, ChannelError> {
        let c_name = to_sem_name(name)?;

        let sem = unsafe { libc::sem_open(c_name.as_ptr(), 0) };
        if sem == libc::SEM_FAILED {
            return Err(ChannelError::SignalError {
                op: "sem_open",
                errno: Errno::last(),
            });
        }

        Ok(Self {
            sem,
            name: c_name,
            manual_reset: config.manual_reset,
            is_owner: false,
        })
    }

    /// Set the signal. An already-set signal stays set.
    pub(crate) fn set(&self) -> Result<(), ChannelError> {
        if self.value()? > 0 {
            return Ok(());
        }
        self.post()
    }

    /// Block until the signal is set or `timeout` elapses; `None` waits
    /// indefinitely. Interrupted waits are restarted.
    pub(crate) fn wait(&self, timeout: Option<Duration>) -> Result<SignalWait, ChannelError> {
        let outcome = match timeout {
            None => loop {
                let ret = unsafe { libc::sem_wait(self.sem) };
                if ret == 0 {
                    break SignalWait::Signaled;
                }
                match Errno::last() {
                    Errno::EINTR => continue,
                    errno => {
                        return Err(ChannelError::SignalError {
                            op: "sem_wait",
                            errno,
                        });
                    }
                }
            },
            Some(timeout) => {
                let deadline = absolute_deadline(timeout)?;
                loop {
                    let ret = unsafe { libc::sem_timedwait(self.sem, &deadline) };
                    if ret == 0 {
                        break SignalWait::Signaled;
                    }
                    match Errno::last() {
                        Errno::EINTR => continue,
                        Errno::ETIMEDOUT => break SignalWait::TimedOut,
                        errno => {
                            return Err(ChannelError::SignalError {
                                op: "sem_timedwait",
                                errno,
                            });
                        }
                    }
                }
            }
        };

        if outcome == SignalWait::Signaled && self.manual_reset {
            // Manual-reset signals stay set until reset() drains them.
            self.post()?;
        }
        Ok(outcome)
    }

    /// Consume the signal if it is currently set, without blocking.
    pub(crate) fn try_wait(&self) -> Result<bool, ChannelError> {
        let ret = unsafe { libc::sem_trywait(self.sem) };
        if ret == 0 {
            return Ok(true);
        }
        match Errno::last() {
            Errno::EAGAIN => Ok(false),
            errno => Err(ChannelError::SignalError {
                op: "sem_trywait",
                errno,
            }),
        }
    }

    /// Drain the signal back to the unsignaled state.
    pub(crate) fn reset(&self) -> Result<(), ChannelError> {
        while self.try_wait()? {}
        Ok(())
    }

    /// Give up ownership so dropping this handle does not unlink a name
    /// that has been handed to a successor signal.
    pub(crate) fn disown(&mut self) {
        self.is_owner = false;
    }

    fn post(&self) -> Result<(), ChannelError> {
        let ret = unsafe { libc::sem_post(self.sem) };
        if ret != 0 {
            return Err(ChannelError::SignalError {
                op: "sem_post",
                errno: Errno::last(),
            });
        }
        Ok(())
    }

    fn value(&self) -> Result<i32, ChannelError> {
        let mut val: c_int = 0;
        let ret = unsafe { libc::sem_getvalue(self.sem, &mut val) };
        if ret != 0 {
            return Err(ChannelError::SignalError {
                op: "sem_getvalue",
                errno: Errno::last(),
            });
        }
        Ok(val)
    }
}

impl Drop for Signal {
    fn drop(&mut self) {
        unsafe { libc::sem_close(self.sem) };
        if self.is_owner {
            unsafe { libc::sem_unlink(self.name.as_ptr()) };
        }
    }
}

fn to_sem_name(name: &str) -> Result<CString, ChannelError> {
    CString::new(name).map_err(|_| ChannelError::InvalidName(name.to_string()))
}

fn absolute_deadline(timeout: Duration) -> Result<libc::timespec, ChannelError> {
    let mut now = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    let ret = unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut now) };
    if ret != 0 {
        return Err(ChannelError::SignalError {
            op: "clock_gettime",
            errno: Errno::last(),
        });
    }

    // Clamp so the timespec arithmetic stays in range for very large timeouts.
    let secs = timeout.as_secs().min(i32::MAX as u64) as libc::time_t;
    let nanos = now.tv_nsec + timeout.subsec_nanos() as libc::c_long;
    Ok(libc::timespec {
        tv_sec: now.tv_sec + secs + (nanos / 1_000_000_000) as libc::time_t,
        tv_nsec: nanos % 1_000_000_000,
    })
}
