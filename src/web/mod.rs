//! Browser mount for the hero particle background
//!
//! Looks up the hero container and its canvas, wires pointer and resize
//! listeners, and drives the animator from `requestAnimationFrame`. Pages
//! without a hero section get nothing: no canvas sizing, no listeners, no loop.

mod canvas;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

pub use canvas::CanvasSurface;

use crate::core::{Animator, FieldConfig};

/// Default container selector and canvas id used by the site markup
pub const DEFAULT_CONTAINER: &str = ".hero";
pub const DEFAULT_CANVAS_ID: &str = "hero-pattern";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    match mount(MountOptions::default()) {
        // Runs for the lifetime of the page
        Ok(Some(handle)) => handle.forget(),
        Ok(None) => {}
        Err(e) => error!(?e, "Failed to mount hero background"),
    }
}

/// Where to mount and with which settings
#[derive(Clone, Debug)]
pub struct MountOptions {
    pub container_selector: String,
    pub canvas_id: String,
    pub config: FieldConfig,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            container_selector: DEFAULT_CONTAINER.to_string(),
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            config: FieldConfig::default(),
        }
    }
}

/// Animator and canvas shared between the frame and event callbacks
struct Shared {
    animator: Animator,
    surface: CanvasSurface,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A DOM listener that stays attached while its closure is held here
struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A mounted, running hero background.
///
/// Dropping the handle (or calling [`HeroHandle::stop`]) stops the loop,
/// cancels the pending frame and detaches all listeners.
pub struct HeroHandle {
    window: Window,
    shared: Rc<RefCell<Shared>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_cb: FrameCallback,
    listeners: Vec<Listener>,
    stopped: bool,
}

/// Mount the hero background.
///
/// Returns `Ok(None)` when the page has no hero container, canvas or 2D
/// context; the component is simply inert there. On error everything
/// attached so far is detached again.
pub fn mount(options: MountOptions) -> Result<Option<HeroHandle>, JsValue> {
    let Some(window) = web_sys::window() else {
        debug!("No window, hero background inert");
        return Ok(None);
    };
    let Some(document) = window.document() else {
        debug!("No document, hero background inert");
        return Ok(None);
    };

    let Some(container) = document.query_selector(&options.container_selector)? else {
        debug!(selector = %options.container_selector, "No hero container, background inert");
        return Ok(None);
    };
    let Some(canvas) = find_canvas(&document, &options.canvas_id)? else {
        debug!(id = %options.canvas_id, "No hero canvas, background inert");
        return Ok(None);
    };
    let Some(surface) = CanvasSurface::from_canvas(canvas)? else {
        debug!("Canvas has no 2D context, background inert");
        return Ok(None);
    };

    let (width, height) = measure(&container);
    surface.fit(width, height, window.device_pixel_ratio())?;
    let animator = Animator::new(options.config, width, height);

    // From here on the handle owns everything, so an early `?` drops it and
    // detaches whatever was registered.
    let mut handle = HeroHandle {
        window: window.clone(),
        shared: Rc::new(RefCell::new(Shared { animator, surface })),
        frame_id: Rc::new(Cell::new(None)),
        frame_cb: Rc::new(RefCell::new(None)),
        listeners: Vec::with_capacity(3),
        stopped: false,
    };

    let on_move = {
        let shared = handle.shared.clone();
        let container = container.clone();
        Closure::wrap(Box::new(move |e: Event| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = container.get_bounding_client_rect();
            let x = e.client_x() as f64 - rect.left();
            let y = e.client_y() as f64 - rect.top();
            shared.borrow_mut().animator.pointer_moved(x, y);
        }) as Box<dyn FnMut(Event)>)
    };
    handle.listen(container.as_ref(), "mousemove", on_move)?;

    let on_leave = {
        let shared = handle.shared.clone();
        Closure::wrap(Box::new(move |_: Event| {
            shared.borrow_mut().animator.pointer_left();
        }) as Box<dyn FnMut(Event)>)
    };
    handle.listen(container.as_ref(), "mouseleave", on_leave)?;

    let on_resize = {
        let shared = handle.shared.clone();
        let container = container.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |_: Event| {
            let (width, height) = measure(&container);
            let mut shared = shared.borrow_mut();
            if let Err(e) = shared.surface.fit(width, height, window.device_pixel_ratio()) {
                error!(?e, "Failed to resize hero canvas");
            }
            shared.animator.resize(width, height);
            info!(width, height, "Hero background resized");
        }) as Box<dyn FnMut(Event)>)
    };
    handle.listen(window.as_ref(), "resize", on_resize)?;

    {
        let shared = handle.shared.clone();
        let frame_id = handle.frame_id.clone();
        let frame_cb_inner = handle.frame_cb.clone();
        let window = window.clone();
        *handle.frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            frame_id.set(None);

            let keep_going = {
                let mut shared = shared.borrow_mut();
                let Shared { animator, surface } = &mut *shared;
                animator.frame_at(timestamp, surface)
            };
            if !keep_going {
                return;
            }

            if let Some(cb) = frame_cb_inner.borrow().as_ref() {
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(e) => error!(?e, "Failed to schedule next frame"),
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }

    let frame_cb = handle.frame_cb.clone();
    let first = match frame_cb.borrow().as_ref() {
        Some(cb) => Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?),
        None => None,
    };
    handle.frame_id.set(first);

    info!(width, height, "Hero background mounted");
    Ok(Some(handle))
}

impl HeroHandle {
    /// Attach `callback` to `target`; it is only kept (and later detached)
    /// if registration succeeded.
    fn listen(
        &mut self,
        target: &EventTarget,
        name: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            name,
            callback,
        });
        Ok(())
    }

    /// Number of DOM listeners currently attached
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Stop the loop and detach everything. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        self.shared.borrow_mut().animator.stop();

        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                error!(?e, "Failed to cancel pending frame");
            }
        }

        for listener in self.listeners.drain(..) {
            let cb = listener.callback.as_ref().unchecked_ref();
            if let Err(e) = listener.target.remove_event_listener_with_callback(listener.name, cb) {
                error!(?e, name = listener.name, "Failed to detach listener");
            }
        }

        // Breaks the frame closure's reference to itself
        self.frame_cb.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().animator.is_running()
    }

    /// Keep the background running for the rest of the page's life
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

impl Drop for HeroHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn find_canvas(document: &Document, id: &str) -> Result<Option<HtmlCanvasElement>, JsValue> {
    match document.get_element_by_id(id) {
        Some(el) => Ok(Some(el.dyn_into::<HtmlCanvasElement>()?)),
        None => Ok(None),
    }
}

fn measure(container: &Element) -> (f64, f64) {
    let rect = container.get_bounding_client_rect();
    (rect.width(), rect.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn options(container: &str, canvas: &str) -> MountOptions {
        MountOptions {
            container_selector: container.to_string(),
            canvas_id: canvas.to_string(),
            ..MountOptions::default()
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("browser document")
    }

    #[wasm_bindgen_test]
    fn test_browser_clock_advances() {
        let a = crate::time::now_seconds();
        let b = crate::time::now_seconds();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[wasm_bindgen_test]
    fn test_inert_without_container() {
        let mounted = mount(options(".no-such-hero", "no-such-canvas")).expect("mount");
        assert!(mounted.is_none());
    }

    #[wasm_bindgen_test]
    fn test_inert_without_canvas() {
        let document = document();
        let hero = document.create_element("div").expect("div");
        hero.set_class_name("hero-no-canvas");
        document.body().expect("body").append_child(&hero).expect("append");

        let mounted = mount(options(".hero-no-canvas", "missing-canvas")).expect("mount");
        assert!(mounted.is_none());
        hero.remove();
    }

    #[wasm_bindgen_test]
    fn test_mount_and_stop() {
        let document = document();
        let hero = document.create_element("div").expect("div");
        hero.set_class_name("hero-mounted");
        let canvas = document.create_element("canvas").expect("canvas");
        canvas.set_id("hero-mounted-canvas");
        hero.append_child(&canvas).expect("append canvas");
        document.body().expect("body").append_child(&hero).expect("append");

        let mut handle = mount(options(".hero-mounted", "hero-mounted-canvas"))
            .expect("mount")
            .expect("hero present");
        assert!(handle.is_running());
        assert_eq!(handle.listener_count(), 3);

        handle.stop();
        assert!(!handle.is_running());
        assert_eq!(handle.listener_count(), 0);

        // Second stop is a no-op
        handle.stop();
        hero.remove();
    }
}
