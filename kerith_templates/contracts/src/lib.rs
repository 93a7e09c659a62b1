use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

pub trait Template: Serialize {
    /// Name the template is registered under. Ends in `.html` so that all
    /// interpolated values are escaped.
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    AppointmentTemplate("appointment.html"),
    ContactTemplate("contact.html"),
}

/// Notification about a new consultation request.
///
/// All values are display ready, formatting happens before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentTemplate {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: String,
    pub event_date: String,
    pub guest_count: Option<u32>,
    pub budget: Option<String>,
    pub venue: Option<String>,
    pub details: String,
    pub how_heard: Option<String>,
}

/// Notification about a new contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactTemplate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}
