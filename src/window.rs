//! Fenêtre native winit, implémentation de [`NativeWindow`].
//!
//! La fenêtre est créée invisible ; elle n'apparaît qu'au `show()` du
//! contrôleur, une fois la surface attachée et la navigation lancée.

use std::rc::Rc;

use servo::{RenderingContext, WindowRenderingContext};
use tracing::debug;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::window::{Window, WindowId};

use crate::lifecycle::{CloseCallback, CloseSlot, NativeWindow, WindowSize};
use crate::surface::WebSurface;

pub struct ServoWindow {
    /// `Rc` pour que le delegate Servo puisse en garder une référence faible.
    window: Rc<Window>,
    rendering_context: Rc<WindowRenderingContext>,
    title: String,
    close: CloseSlot,
    visible: bool,
}

impl ServoWindow {
    pub(crate) fn new(
        window: Window,
        rendering_context: Rc<WindowRenderingContext>,
        title: String,
    ) -> Self {
        Self {
            window: Rc::new(window),
            rendering_context,
            title,
            close: CloseSlot::default(),
            visible: false,
        }
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Présente le frame que Servo vient de peindre.
    pub fn present(&self) {
        self.rendering_context.present();
    }
}

impl NativeWindow for ServoWindow {
    type Content = WebSurface;

    fn set_content(&mut self, content: &mut WebSurface) {
        content.attach(
            Rc::downgrade(&self.window),
            self.rendering_context.clone(),
            self.window.scale_factor(),
            self.title.clone(),
        );
    }

    fn on_close(&mut self, callback: CloseCallback) {
        self.close.register(callback);
    }

    fn show(&mut self) {
        if self.visible {
            return;
        }
        self.window.set_visible(true);
        self.visible = true;
        self.window.request_redraw();
        debug!(window = ?self.window.id(), "Fenêtre affichée");
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn client_size(&self) -> WindowSize {
        let size: LogicalSize<u32> = self.window.inner_size().to_logical(self.window.scale_factor());
        // Une fenêtre minimisée peut rapporter 0x0.
        WindowSize::new(size.width.max(1), size.height.max(1)).expect("clamped size is non-zero")
    }

    /// Redimensionne la surface GL après un `Resized` winit (pixels physiques).
    fn resize(&mut self, size: WindowSize) {
        self.rendering_context
            .resize(PhysicalSize::new(size.width(), size.height()));
    }

    fn close_requested(&mut self) {
        self.close.fire();
    }
}
