//! Platform abstraction layer
//!
//! Collaborators the game talks to but does not implement:
//! - Raw button levels
//! - Network services (remote update channel, network presence)
//! - Startup animation

use crate::input::Button;
use crate::renderer::Renderer;

/// Raw (undebounced) button levels
pub trait ButtonSource {
    fn is_pressed(&mut self, button: Button) -> bool;
}

/// Remote update channel and network presence.
/// Only serviced while the game sits on the splash screen.
pub trait NetworkServices {
    /// Service pending network work (called once per idle frame)
    fn poll(&mut self);
    /// Stop every service for good
    fn shutdown(&mut self);
}

/// Capability handle around the network services.
///
/// Closing is idempotent and cannot be undone; a closed handle stays closed
/// for the rest of the process.
pub struct NetworkHandle {
    services: Option<Box<dyn NetworkServices>>,
}

impl NetworkHandle {
    pub fn new(services: Box<dyn NetworkServices>) -> Self {
        Self {
            services: Some(services),
        }
    }

    /// A handle with nothing behind it
    pub fn closed() -> Self {
        Self { services: None }
    }

    pub fn is_open(&self) -> bool {
        self.services.is_some()
    }

    /// Service the network if still open
    pub fn poll(&mut self) {
        if let Some(services) = self.services.as_mut() {
            services.poll();
        }
    }

    /// Shut the services down. Returns true only on the call that closed it.
    pub fn close(&mut self) -> bool {
        match self.services.take() {
            Some(mut services) => {
                services.shutdown();
                log::info!("Network services shut down");
                true
            }
            None => false,
        }
    }
}

impl Drop for NetworkHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Intro played before the splash screen. Fire-and-forget.
pub trait StartupAnimation {
    fn play(&mut self, renderer: &mut dyn Renderer);
}

/// Built-in intro: nested frames closing in on the screen center
#[derive(Debug, Clone, Copy)]
pub struct BootWipe {
    pub width: i32,
    pub height: i32,
    /// Frames in the sequence
    pub frames: i32,
}

impl BootWipe {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            frames: 8,
        }
    }
}

impl StartupAnimation for BootWipe {
    fn play(&mut self, renderer: &mut dyn Renderer) {
        let step_x = self.width / (2 * self.frames).max(1);
        let step_y = self.height / (2 * self.frames).max(1);
        for i in 0..self.frames {
            let (x, y) = (i * step_x, i * step_y);
            let (w, h) = (self.width - 2 * x, self.height - 2 * y);
            if w <= 0 || h <= 0 {
                break;
            }
            renderer.clear();
            renderer.draw_frame(x, y, w, h);
            renderer.present();
        }
        renderer.clear();
        renderer.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::renderer::Framebuffer;

    struct Counting {
        polls: Rc<Cell<u32>>,
        shutdowns: Rc<Cell<u32>>,
    }

    impl NetworkServices for Counting {
        fn poll(&mut self) {
            self.polls.set(self.polls.get() + 1);
        }

        fn shutdown(&mut self) {
            self.shutdowns.set(self.shutdowns.get() + 1);
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let polls = Rc::new(Cell::new(0));
        let shutdowns = Rc::new(Cell::new(0));
        let mut handle = NetworkHandle::new(Box::new(Counting {
            polls: polls.clone(),
            shutdowns: shutdowns.clone(),
        }));

        handle.poll();
        assert!(handle.is_open());
        assert!(handle.close());
        assert!(!handle.close());
        assert!(!handle.is_open());

        // Closed handles ignore polls
        handle.poll();
        drop(handle);
        assert_eq!(polls.get(), 1);
        assert_eq!(shutdowns.get(), 1);
    }

    #[test]
    fn test_drop_closes() {
        let shutdowns = Rc::new(Cell::new(0));
        let handle = NetworkHandle::new(Box::new(Counting {
            polls: Rc::new(Cell::new(0)),
            shutdowns: shutdowns.clone(),
        }));
        drop(handle);
        assert_eq!(shutdowns.get(), 1);
    }

    #[test]
    fn test_boot_wipe_ends_blank() {
        let mut fb = Framebuffer::new(128, 64);
        BootWipe::new(128, 64).play(&mut fb);
        assert_eq!(fb.lit_pixels(), 0);
        assert_eq!(fb.frames_presented(), 9);
    }
}
