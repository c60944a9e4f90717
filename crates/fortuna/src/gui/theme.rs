use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    /// The wheel face keeps its own festive palette; the chrome follows the
    /// GTK theme.
    pub segments: [Srgba<f64>; 5],
    pub rim: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub hub_text: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub result_text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            segments: segment_palette(),
            rim: Srgba::new(1.0, 1.0, 1.0, 1.0),
            hub: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
            hub_text: Self::lookup_color(
                context,
                "theme_text_color",
                Srgba::new(0.1, 0.1, 0.1, 1.0),
                Some(1.0),
            ),
            pointer: Srgba::new(0.99, 0.88, 0.28, 1.0),
            result_text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

fn segment_palette() -> [Srgba<f64>; 5] {
    [
        Srgba::new(1.0, 0.494, 0.878, 1.0),
        Srgba::new(1.0, 0.729, 0.494, 1.0),
        Srgba::new(0.494, 1.0, 0.953, 1.0),
        Srgba::new(0.494, 1.0, 0.604, 1.0),
        Srgba::new(0.729, 0.494, 1.0, 1.0),
    ]
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.fortuna-window {
    background: linear-gradient(135deg, #3730a3, #7e22ce, #db2777);
}
.fortuna-wheel {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
