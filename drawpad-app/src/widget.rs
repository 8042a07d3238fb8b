//! The exported widget and its style sheet.

use std::cell::RefCell;
use std::rc::Rc;

use drawpad_core::{DrawPad, DrawingEngine, PadConfig, PadError, PadStyles, PadView, Point};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::builder::{self, PAD_ATTRIBUTE};
use crate::dom::{self, create, set_attribute};
use crate::engine::{ActionBits, EngineHooks, JsEngine};
use crate::error::{AppError, AppResult};
use crate::handlers::{self, Pad, PadCell};
use crate::listeners::ListenerSet;
use crate::view::{DomView, StylingHook};

/// Class names and the default style sheet, shared by every pad on a page.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct PadStyleSheet {
    styles: PadStyles,
}

#[wasm_bindgen]
impl PadStyleSheet {
    /// Create a style sheet, optionally overriding class names with JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe class names.
    #[wasm_bindgen(constructor)]
    pub fn new(styles_json: Option<String>) -> Result<PadStyleSheet, JsValue> {
        let styles = match styles_json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| AppError::Pad(PadError::Serialization(e)))?,
            None => PadStyles::default(),
        };
        Ok(Self { styles })
    }

    /// The rendered default CSS.
    #[wasm_bindgen(js_name = cssText)]
    #[must_use]
    pub fn css_text(&self) -> String {
        self.styles.stylesheet()
    }

    /// Class of the pad container.
    #[wasm_bindgen(getter, js_name = containerClass)]
    #[must_use]
    pub fn container_class(&self) -> String {
        self.styles.container.clone()
    }

    /// Insert the default styles at the top of `<head>` so page styles win.
    ///
    /// Returns `false` when they are already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no head or the insert fails.
    pub fn install(&self) -> Result<bool, JsValue> {
        let document = dom::document()?;
        Ok(install_styles(&document, &self.styles)?)
    }
}

fn install_styles(document: &Document, styles: &PadStyles) -> AppResult<bool> {
    if document.get_element_by_id(&styles.style_id).is_some() {
        return Ok(false);
    }
    tracing::info!("Setting up default drawing pad styles for the first time");

    let head = document.head().ok_or(AppError::NoDocument)?;
    let style: HtmlElement = create(document, "style")?;
    style.set_id(&styles.style_id);
    style.set_text_content(Some(&styles.stylesheet()));
    head.insert_before(&style, head.first_child().as_ref())
        .map_err(|e| AppError::dom(&e))?;
    Ok(true)
}

/// Everything a generated pad keeps alive.
struct Mounted {
    cell: Rc<PadCell>,
    listeners: ListenerSet,
    hooks: Option<EngineHooks>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.listeners.clear();
        self.hooks.take();
    }
}

/// An embeddable drawing pad.
///
/// ```javascript
/// const styles = new PadStyleSheet();
/// const pad = new DrawPadWidget(styles, JSON.stringify({ width: 300 }));
/// document.body.appendChild(pad.generate());
/// pad.refreshLocation();
/// ```
#[wasm_bindgen]
pub struct DrawPadWidget {
    config: PadConfig,
    styles: PadStyles,
    styling_hook: StylingHook,
    generated: bool,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl DrawPadWidget {
    /// Create a widget. Nothing is built until [`Self::generate`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration JSON is malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(
        styles: &PadStyleSheet,
        config_json: Option<String>,
    ) -> Result<DrawPadWidget, JsValue> {
        let config = match config_json {
            Some(json) => PadConfig::from_json(&json).map_err(AppError::from)?,
            None => PadConfig::default(),
        };
        config.validate().map_err(AppError::from)?;
        Ok(Self {
            config,
            styles: styles.styles.clone(),
            styling_hook: Rc::new(RefCell::new(None)),
            generated: false,
            mounted: None,
        })
    }

    /// Build the DOM, attach the engine and return the container.
    ///
    /// # Errors
    ///
    /// Throws on a second call, or if the page lacks the `CanvasDrawer` engine.
    pub fn generate(&mut self) -> Result<HtmlElement, JsValue> {
        if self.generated {
            tracing::warn!("Tried to generate drawing pad again");
            return Err(AppError::from(PadError::AlreadyGenerated).into());
        }
        Ok(self.mount()?)
    }

    /// Release every listener and engine hook installed by [`Self::generate`].
    ///
    /// The container stays where the host put it.
    pub fn teardown(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            if let Some(id) = mounted.cell.with(|pad| pad.id()) {
                tracing::info!(pad = %id, "Tearing down drawing pad");
            }
        }
    }

    /// Reposition the canvas; call after inserting or resizing the container.
    ///
    /// # Errors
    ///
    /// Throws if the pad is not generated.
    #[wasm_bindgen(js_name = refreshLocation)]
    pub fn refresh_location(&self) -> Result<(), JsValue> {
        Ok(self.with(Pad::refresh_location)?)
    }

    /// Zoom by `delta` levels, keeping the easel point `(anchor_x, anchor_y)`
    /// fixed (the easel centre when omitted). Returns whether the zoom applied.
    ///
    /// # Errors
    ///
    /// Throws if the pad is not generated.
    #[wasm_bindgen(js_name = updateZoom)]
    pub fn update_zoom(
        &self,
        delta: i32,
        anchor_x: Option<f64>,
        anchor_y: Option<f64>,
    ) -> Result<bool, JsValue> {
        let anchor = anchor_x.zip(anchor_y).map(|(x, y)| Point::new(x, y));
        Ok(self.with(|pad| pad.update_zoom(delta, anchor))?)
    }

    /// Back to the origin at minimum zoom.
    ///
    /// # Errors
    ///
    /// Throws if the pad is not generated.
    #[wasm_bindgen(js_name = resetNavigation)]
    pub fn reset_navigation(&self) -> Result<(), JsValue> {
        Ok(self.with(Pad::reset_navigation)?)
    }

    /// Show or hide the cursor position bar. Before generation this sets the
    /// initial state.
    ///
    /// # Errors
    ///
    /// Throws if the pad is busy.
    #[wasm_bindgen(js_name = setInfoDisplayed)]
    pub fn set_info_displayed(&mut self, displayed: bool) -> Result<(), JsValue> {
        self.config.show_info = displayed;
        if self.mounted.is_some() {
            self.with(|pad| pad.set_info_displayed(displayed))?;
        }
        Ok(())
    }

    /// Exchange two layers, buffers and thumbnails together.
    ///
    /// # Errors
    ///
    /// Throws if a position is out of range or the pad is not generated.
    #[wasm_bindgen(js_name = swapLayers)]
    pub fn swap_layers(&self, a: usize, b: usize) -> Result<(), JsValue> {
        self.with(|pad| pad.swap_layers(a, b))?
            .map_err(|e| AppError::from(e).into())
    }

    /// Callback run after every navigation change and window resize.
    #[wasm_bindgen(setter = fixToolStylingCallback)]
    pub fn set_fix_tool_styling_callback(&self, callback: Option<Function>) {
        *self.styling_hook.borrow_mut() = callback;
    }

    /// Run the tool styling callback now.
    ///
    /// # Errors
    ///
    /// Throws if the pad is not generated.
    #[wasm_bindgen(js_name = fixToolStyling)]
    pub fn fix_tool_styling(&self) -> Result<(), JsValue> {
        Ok(self.with(|pad| pad.view_mut().styling_changed())?)
    }

    /// The composited canvas as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Throws if the pad is not generated.
    #[wasm_bindgen(js_name = getImage)]
    pub fn get_image(&self) -> Result<Option<String>, JsValue> {
        Ok(self.with(|pad| pad.engine().png_data_url())?)
    }

    /// Current zoom level, once generated.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn zoom(&self) -> Option<u32> {
        self.with(|pad| pad.navigation().zoom()).ok()
    }

    /// The pad's unique id, once generated.
    #[wasm_bindgen(getter, js_name = padId)]
    #[must_use]
    pub fn pad_id(&self) -> Option<String> {
        self.with(|pad| pad.id().to_string()).ok()
    }

    /// Whether [`Self::generate`] succeeded.
    #[wasm_bindgen(getter, js_name = isGenerated)]
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

impl DrawPadWidget {
    fn with<R>(&self, f: impl FnOnce(&mut Pad) -> R) -> AppResult<R> {
        let mounted = self.mounted.as_ref().ok_or(AppError::NotGenerated)?;
        mounted.cell.with(f).ok_or(AppError::Busy)
    }

    fn mount(&mut self) -> AppResult<HtmlElement> {
        let window = dom::window()?;
        let document = dom::document()?;
        install_styles(&document, &self.styles)?;

        let elements = builder::build(&document, &self.config, &self.styles)?;
        let layer_canvases: Vec<_> = elements.layers.iter().map(|l| l.canvas.clone()).collect();
        let engine = JsEngine::attach(
            &elements.canvas,
            &layer_canvases,
            self.config.max_undos,
            self.config.wheel_zoom,
        )?;

        let view = DomView::new(
            document.clone(),
            elements.clone(),
            Rc::clone(&self.styling_hook),
        );
        let pad = DrawPad::new(self.config.clone(), engine.clone(), view)?;
        set_attribute(&elements.container, PAD_ATTRIBUTE, &pad.id().to_string())?;

        let cell = PadCell::new(pad);
        let sink = Rc::downgrade(&cell);
        let hooks = EngineHooks::install(&engine, ActionBits::from_global(), move |event| {
            if let Some(cell) = sink.upgrade() {
                cell.push(event);
            }
        });

        cell.with(Pad::generate).ok_or(AppError::Busy)??;
        let listeners = handlers::wire(&cell, &window, &document, &elements, &self.styles)?;

        self.generated = true;
        self.mounted = Some(Mounted {
            cell,
            listeners,
            hooks: Some(hooks),
        });
        Ok(elements.container)
    }
}

impl std::fmt::Debug for DrawPadWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawPadWidget")
            .field("config", &self.config)
            .field("generated", &self.generated)
            .field("mounted", &self.mounted.is_some())
            .finish_non_exhaustive()
    }
}
