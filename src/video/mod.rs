//! Hand-off of finished frames to whatever displays them.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives finished frames
pub trait RenderingDevice {
    /// `frame` holds `width * height` pixels, row-major
    fn update_frame(&mut self, frame: &[u32], width: u32, height: u32);
}

/// Forwards frames to at most one attached device.
///
/// With no device attached, frames are dropped.
#[derive(Default)]
pub struct VideoRenderer {
    device: Option<Rc<RefCell<dyn RenderingDevice>>>,
}

impl VideoRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self { device: None }
    }

    /// Attach `device`, replacing any device already attached
    pub fn attach(&mut self, device: Rc<RefCell<dyn RenderingDevice>>) {
        self.device = Some(device);
    }

    /// Detach `device` if it is the one attached; otherwise do nothing
    pub fn detach(&mut self, device: &Rc<RefCell<dyn RenderingDevice>>) {
        if self
            .device
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, device))
        {
            self.device = None;
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.device.is_some()
    }

    pub fn update_frame(&self, frame: &[u32], width: u32, height: u32) {
        if let Some(device) = &self.device {
            device.borrow_mut().update_frame(frame, width, height);
        }
    }
}
