use metrics_exporter_prometheus::PrometheusHandle;
use qap_score::scoring::session::QapSession;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Shared service state: the readiness flag and metrics handle for the
/// operational endpoints, one in-memory session guarded by a mutex, and the
/// busy flag that serializes report exports.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) session: Arc<Mutex<QapSession>>,
    pub(crate) exporting: Arc<AtomicBool>,
    pub(crate) export_dir: PathBuf,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, export_dir: PathBuf) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            session: Arc::new(Mutex::new(QapSession::new())),
            exporting: Arc::new(AtomicBool::new(false)),
            export_dir,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(session: QapSession, export_dir: PathBuf) -> Self {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        Self {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(recorder.handle()),
            session: Arc::new(Mutex::new(session)),
            exporting: Arc::new(AtomicBool::new(false)),
            export_dir,
        }
    }
}

/// RAII guard for the export busy flag; `acquire` fails while another export
/// holds it.
pub(crate) struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl ExportGuard {
    pub(crate) fn acquire(flag: Arc<AtomicBool>) -> Option<Self> {
        use std::sync::atomic::Ordering;
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, std::sync::atomic::Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_guard_is_exclusive_until_dropped() {
        let flag = Arc::new(AtomicBool::new(false));

        let guard = ExportGuard::acquire(flag.clone()).expect("first acquire succeeds");
        assert!(ExportGuard::acquire(flag.clone()).is_none());

        drop(guard);
        assert!(ExportGuard::acquire(flag).is_some());
    }
}
