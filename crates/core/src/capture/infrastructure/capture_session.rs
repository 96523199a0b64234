use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::domain::render_sink::RenderSink;
use crate::pipeline::frame_gate::FrameGate;

type SharedSink = Arc<Mutex<Option<Box<dyn RenderSink>>>>;

/// A running capture loop on its own thread.
///
/// The thread pulls frames from the source, hands each one to the gate
/// for annotation, and renders the result to the current output sink.
/// The sink can be attached, replaced, or removed while the loop runs,
/// which is how surface changes from the host side are handled; frames
/// arriving with no sink attached are annotated and discarded.
pub struct CaptureSession {
    stop: Arc<AtomicBool>,
    output: SharedSink,
    handle: Option<JoinHandle<()>>,
}

impl CaptureSession {
    /// Spawn the capture thread. Returns immediately; the loop ends when
    /// the source is exhausted, the source errors, or [`close`] is called.
    /// The initial sink is in place before the first frame is pulled.
    ///
    /// [`close`]: CaptureSession::close
    pub fn open(
        mut source: Box<dyn FrameSource>,
        gate: Arc<FrameGate>,
        sink: Option<Box<dyn RenderSink>>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let output: SharedSink = Arc::new(Mutex::new(sink));

        let handle = {
            let stop = stop.clone();
            let output = output.clone();
            std::thread::spawn(move || {
                loop {
                    if stop.load(Ordering::SeqCst) {
                        log::debug!("capture loop stopped");
                        break;
                    }
                    let mut frame = match source.next_frame() {
                        Ok(Some(frame)) => frame,
                        Ok(None) => {
                            log::debug!("capture source exhausted");
                            break;
                        }
                        Err(e) => {
                            log::error!("capture source failed: {e}");
                            break;
                        }
                    };

                    gate.process_frame(&mut frame);

                    let mut sink = output.lock().unwrap_or_else(PoisonError::into_inner);
                    if let Some(sink) = sink.as_mut() {
                        if let Err(e) = sink.render(&frame) {
                            log::warn!("render failed on frame {}: {e}", frame.index());
                        }
                    }
                }
            })
        };

        Self {
            stop,
            output,
            handle: Some(handle),
        }
    }

    /// Attach, replace, or (with `None`) detach the output sink.
    pub fn set_output(&self, sink: Option<Box<dyn RenderSink>>) {
        *self.output.lock().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some() && !self.stop.load(Ordering::SeqCst)
    }

    /// Signal the loop to stop and join the thread. Idempotent.
    pub fn close(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        self.join();
    }

    /// Block until the loop ends on its own (source exhausted or failed).
    pub fn wait(&mut self) {
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("capture thread panicked");
            }
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.close();
    }
}
