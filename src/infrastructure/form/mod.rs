mod acroform_template;

pub use acroform_template::AcroFormTemplate;
