//! Class names and the default style sheet.
//!
//! Hosts build one [`PadStyles`] and hand it to every pad they create; the
//! sheet is inserted ahead of page styles so the page can override it.

use serde::{Deserialize, Serialize};

/// CSS class names used by the pad's DOM tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PadStyles {
    pub container: String,
    pub easel: String,
    pub controls: String,
    pub toolbox: String,
    pub tool_options: String,
    pub draw_tools: String,
    pub actions: String,
    pub layers: String,
    pub layer: String,
    pub layer_controls: String,
    pub links: String,
    pub info: String,
    pub cursor_position: String,
    pub canvas: String,
    pub canvas_container: String,
    pub color_picker: String,
    pub width_picker: String,
    /// Id of the `<style>` element holding the sheet.
    pub style_id: String,
}

impl Default for PadStyles {
    fn default() -> Self {
        Self {
            container: "drawpad".to_string(),
            easel: "easel".to_string(),
            controls: "controls".to_string(),
            toolbox: "toolbox".to_string(),
            tool_options: "tooloptions".to_string(),
            draw_tools: "drawtools".to_string(),
            actions: "actions".to_string(),
            layers: "layers".to_string(),
            layer: "layer".to_string(),
            layer_controls: "layercontrols".to_string(),
            links: "links".to_string(),
            info: "info".to_string(),
            cursor_position: "cursorposition".to_string(),
            canvas: "draw".to_string(),
            canvas_container: "drawcontainer".to_string(),
            color_picker: "colorpicker".to_string(),
            width_picker: "widthpicker".to_string(),
            style_id: "drawpad_default_styles".to_string(),
        }
    }
}

struct Sheet {
    out: String,
}

impl Sheet {
    fn rule(&mut self, selectors: &[String], declarations: &[&str]) {
        self.out.push_str(&selectors.join(", "));
        self.out.push_str(" { ");
        for declaration in declarations {
            self.out.push_str(declaration);
            self.out.push_str("; ");
        }
        self.out.push_str("}\n");
    }
}

impl PadStyles {
    fn within(&self, parts: &[&str]) -> String {
        let mut selector = format!(".{}", self.container);
        for part in parts {
            selector.push(' ');
            selector.push_str(part);
        }
        selector
    }

    fn class(name: &str) -> String {
        format!(".{name}")
    }

    /// Render the default style sheet.
    #[must_use]
    pub fn stylesheet(&self) -> String {
        let mut sheet = Sheet { out: String::new() };
        let c = Self::class;
        let root = c(&self.container);

        sheet.rule(
            &[format!("{root} *"), root.clone()],
            &["padding:0", "margin:0", "display:inline"],
        );

        sheet.rule(
            &[self.within(&[c(&self.easel).as_str()]), root.clone()],
            &[
                "max-width:100%",
                "max-height:100%",
                "min-width:100%",
                "min-height:100%",
                "width:200px",
                "height:200px",
                "position:relative",
                "display:block",
                "overflow:hidden",
            ],
        );
        sheet.rule(
            &[self.within(&[c(&self.easel).as_str()])],
            &["background-color:#EEE", "z-index:1"],
        );
        sheet.rule(
            &[self.within(&[c(&self.canvas_container).as_str()])],
            &["position:absolute", "display:block", "font-size:0"],
        );

        sheet.rule(
            &[self.within(&[c(&self.canvas).as_str()])],
            &[
                "image-rendering:optimizeSpeed",
                "image-rendering:-moz-crisp-edges",
                "image-rendering:-webkit-optimize-contrast",
                "image-rendering:pixelated",
                "-ms-interpolation-mode:nearest-neighbor",
            ],
        );

        sheet.rule(
            &[self.within(&[c(&self.controls).as_str()])],
            &[
                "vertical-align:top",
                "position:absolute",
                "top:0",
                "left:0",
                "z-index:2",
                "height:0",
            ],
        );
        sheet.rule(
            &[self.within(&[c(&self.controls).as_str(), "button"])],
            &[
                "width:30px",
                "height:30px",
                "line-height:16px",
                "vertical-align:top",
                "font-size:24px",
                "display:inline",
            ],
        );
        sheet.rule(
            &[self.within(&[c(&self.controls).as_str(), "input"])],
            &["width:40px", "height:30px", "font-size:20px", "vertical-align:top"],
        );
        sheet.rule(
            &[self.within(&[c(&self.controls).as_str(), "canvas"])],
            &["width:28px", "height:28px", "padding:0", "border:1px solid #777"],
        );

        sheet.rule(
            &[self.within(&[c(&self.toolbox).as_str(), "button"])],
            &["background-color:#EFEFEE", "border:1px solid #888"],
        );
        sheet.rule(
            &[self.within(&[c(&self.width_picker).as_str(), "button"])],
            &["width:15px"],
        );

        sheet.rule(
            &[
                self.within(&[c(&self.actions).as_str(), "button"]),
                self.within(&[c(&self.width_picker).as_str(), "button"]),
            ],
            &["background-color:#E5E4E7", "border:1px solid #888"],
        );
        sheet.rule(
            &[
                self.within(&[c(&self.actions).as_str(), "button:hover:enabled"]),
                self.within(&[c(&self.width_picker).as_str(), "button:hover:enabled"]),
            ],
            &["background-color:#B1E3FF", "border:1px solid #888"],
        );

        sheet.rule(&[self.within(&[c(&self.layers).as_str()])], &["display:inline-block"]);
        sheet.rule(
            &[self.within(&[c(&self.layer_controls).as_str()])],
            &["text-align:center", "display:block"],
        );
        sheet.rule(
            &[self.within(&[c(&self.layer_controls).as_str(), "button"])],
            &[
                "width:20px",
                "height:20px",
                "line-height:0",
                "font-size:15px",
                "font-weight:bold",
            ],
        );
        sheet.rule(
            &[self.within(&[c(&self.layer_controls).as_str(), "input"])],
            &["width:80px", "height:20px"],
        );

        sheet.rule(
            &[self.within(&[c(&self.info).as_str()])],
            &[
                "vertical-align:top",
                "position:absolute",
                "bottom:0",
                "left:0",
                "right:0",
                "margin:auto",
                "font-family:monospace",
                "font-size:12px",
                "z-index:2",
                "background-color:#F4F4F4",
                "padding:2px 4px",
                "width:75px",
                "text-align:center",
            ],
        );

        sheet.rule(
            &[self.within(&[c(&self.links).as_str()])],
            &[
                "vertical-align:top",
                "position:absolute",
                "bottom:0",
                "left:0",
                "font-family:monospace",
                "font-size:12px",
                "z-index:2",
            ],
        );
        sheet.rule(
            &[self.within(&[c(&self.links).as_str(), "a"])],
            &[
                "padding:3px",
                "display:inline-block",
                "background-color:#EEE",
                "margin-right:3px",
            ],
        );

        sheet.rule(
            &[self.within(&["button:disabled"])],
            &["background-color:#D7D7D7"],
        );
        sheet.rule(
            &[self.within(&["button[data-selected]"])],
            &["background-color:#91D3FF", "border-color:#89A"],
        );
        sheet.rule(
            &[self.within(&["[data-selected]", "canvas"])],
            &["border:2px solid blue", "width:26px", "height:26px"],
        );

        sheet.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_is_scoped_to_container() {
        let styles = PadStyles::default();
        let css = styles.stylesheet();
        assert!(css.starts_with(".drawpad *, .drawpad {"));
        assert!(css.contains(".drawpad .easel { background-color:#EEE; z-index:1; }"));
        assert!(css.contains(".drawpad [data-selected] canvas"));
        for line in css.lines() {
            assert!(line.starts_with(".drawpad"), "unscoped rule: {line}");
        }
    }

    #[test]
    fn custom_class_names_flow_into_rules() {
        let styles: PadStyles =
            serde_json::from_str(r#"{"container": "pad", "easel": "stand"}"#).expect("valid");
        let css = styles.stylesheet();
        assert!(css.contains(".pad .stand"));
        assert!(!css.contains(".drawpad"));
        assert_eq!(styles.controls, "controls");
    }
}
