use std::collections::HashMap;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::application::ports::{FormError, FormTemplate};
use crate::domain::FieldKind;

// AcroForm field flag bits (PDF 32000-1, table 226/229).
const FF_READ_ONLY: i64 = 1;
const FF_RADIO: i64 = 1 << 15;
const FF_PUSHBUTTON: i64 = 1 << 16;

// Annotation flag: render when printing.
const ANNOT_PRINT: i64 = 1 << 2;

const APPEARANCE_FONT_SIZE: f32 = 10.0;

/// One working copy of the fillable PDF template.
///
/// Field metadata is probed once at parse time and dispatched through
/// [`FieldKind`]; the setters then mutate the underlying objects directly.
pub struct AcroFormTemplate {
    doc: Document,
    fields: HashMap<String, FieldSlot>,
    appearance_font: ObjectId,
    flattened: bool,
}

struct FieldSlot {
    field_id: ObjectId,
    kind: FieldKind,
    widgets: Vec<ObjectId>,
    data: SlotData,
}

enum SlotData {
    Text,
    Check {
        /// Name of the widget's non-Off appearance state.
        on_state: Vec<u8>,
    },
    Radio {
        options: Vec<RadioOption>,
    },
    Unknown,
}

struct RadioOption {
    state: Vec<u8>,
    /// Export value: the /Opt entry when present, else the state name.
    export: String,
    widget: ObjectId,
}

impl AcroFormTemplate {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormError> {
        let mut doc = Document::load_mem(bytes)
            .map_err(|e| FormError::ReadFailed(format!("failed to parse template PDF: {e}")))?;

        let field_ids = top_level_field_ids(&doc)?;
        let mut fields = HashMap::new();
        for id in field_ids {
            collect_fields(&doc, id, None, None, &mut fields)?;
        }
        tracing::debug!(field_count = fields.len(), "Template fields probed");

        let appearance_font = doc.add_object(dictionary! {
            "Type" => Object::Name(b"Font".to_vec()),
            "Subtype" => Object::Name(b"Type1".to_vec()),
            "BaseFont" => Object::Name(b"Helvetica".to_vec()),
            "Encoding" => Object::Name(b"WinAnsiEncoding".to_vec()),
        });

        Ok(Self {
            doc,
            fields,
            appearance_font,
            flattened: false,
        })
    }

    fn slot(&self, key: &str) -> Result<&FieldSlot, FormError> {
        self.fields
            .get(key)
            .ok_or_else(|| FormError::NoSuchField(key.to_string()))
    }

    fn field_dict_mut(&mut self, id: ObjectId) -> Result<&mut Dictionary, FormError> {
        self.doc
            .get_object_mut(id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| FormError::RenderFailed(format!("field object {id:?}: {e}")))
    }

    /// Bake a minimal appearance stream showing `value` into one widget.
    fn write_text_appearance(&mut self, widget: ObjectId, value: &str) -> Result<(), FormError> {
        let rect = {
            let dict = self
                .doc
                .get_object(widget)
                .and_then(Object::as_dict)
                .map_err(|e| FormError::RenderFailed(format!("widget object: {e}")))?;
            widget_rect(dict)
        };
        let (width, height) = rect.unwrap_or((100.0, 20.0));
        let baseline = ((height - APPEARANCE_FONT_SIZE) / 2.0).max(2.0);

        let content = format!(
            "/Tx BMC\nq\nBT\n/Helv {APPEARANCE_FONT_SIZE} Tf\n0 g\n2 {baseline:.2} Td\n({}) Tj\nET\nQ\nEMC",
            escape_pdf_string(value)
        );
        let stream_dict = dictionary! {
            "Type" => Object::Name(b"XObject".to_vec()),
            "Subtype" => Object::Name(b"Form".to_vec()),
            "BBox" => Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(width),
                Object::Real(height),
            ]),
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "Helv" => Object::Reference(self.appearance_font),
                },
            },
        };
        let stream_id = self
            .doc
            .add_object(Object::Stream(Stream::new(stream_dict, content.into_bytes())));

        let dict = self.field_dict_mut(widget)?;
        dict.set(
            "AP",
            dictionary! { "N" => Object::Reference(stream_id) },
        );
        Ok(())
    }
}

impl FormTemplate for AcroFormTemplate {
    fn field_kind(&self, key: &str) -> FieldKind {
        self.fields
            .get(key)
            .map(|slot| slot.kind)
            .unwrap_or(FieldKind::Unknown)
    }

    fn set_text(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        if self.flattened {
            return Err(FormError::AlreadyFlattened);
        }
        let slot = self.slot(key)?;
        if !matches!(slot.data, SlotData::Text) {
            return Err(FormError::WrongKind {
                key: key.to_string(),
                expected: "text field",
            });
        }
        let field_id = slot.field_id;
        let widgets = slot.widgets.clone();

        self.field_dict_mut(field_id)?
            .set("V", Object::string_literal(value));
        for widget in widgets {
            self.write_text_appearance(widget, value)?;
        }
        Ok(())
    }

    fn set_checkbox(&mut self, key: &str, checked: bool) -> Result<(), FormError> {
        if self.flattened {
            return Err(FormError::AlreadyFlattened);
        }
        let slot = self.slot(key)?;
        let SlotData::Check { on_state } = &slot.data else {
            return Err(FormError::WrongKind {
                key: key.to_string(),
                expected: "checkbox",
            });
        };
        let state = if checked {
            on_state.clone()
        } else {
            b"Off".to_vec()
        };
        let field_id = slot.field_id;
        let widgets = slot.widgets.clone();

        self.field_dict_mut(field_id)?
            .set("V", Object::Name(state.clone()));
        for widget in widgets {
            self.field_dict_mut(widget)?
                .set("AS", Object::Name(state.clone()));
        }
        Ok(())
    }

    fn select_radio(&mut self, key: &str, option: &str) -> Result<(), FormError> {
        if self.flattened {
            return Err(FormError::AlreadyFlattened);
        }
        let slot = self.slot(key)?;
        let SlotData::Radio { options } = &slot.data else {
            return Err(FormError::WrongKind {
                key: key.to_string(),
                expected: "radio group",
            });
        };

        let selected = options
            .iter()
            .find(|o| o.export == option || o.state == option.as_bytes())
            .ok_or_else(|| FormError::NoSuchOption {
                key: key.to_string(),
                option: option.to_string(),
            })?;
        let state = selected.state.clone();
        let selected_widget = selected.widget;
        let widgets: Vec<(ObjectId, bool)> = options
            .iter()
            .map(|o| (o.widget, o.widget == selected_widget))
            .collect();
        let field_id = slot.field_id;

        self.field_dict_mut(field_id)?
            .set("V", Object::Name(state.clone()));
        for (widget, is_selected) in widgets {
            let value = if is_selected {
                Object::Name(state.clone())
            } else {
                Object::Name(b"Off".to_vec())
            };
            self.field_dict_mut(widget)?.set("AS", value);
        }
        Ok(())
    }

    fn flatten(&mut self) -> Result<(), FormError> {
        if self.flattened {
            return Err(FormError::AlreadyFlattened);
        }

        let slots: Vec<(ObjectId, Vec<ObjectId>)> = self
            .fields
            .values()
            .map(|slot| (slot.field_id, slot.widgets.clone()))
            .collect();

        for (field_id, widgets) in slots {
            let dict = self.field_dict_mut(field_id)?;
            let flags = dict.get(b"Ff").and_then(Object::as_i64).unwrap_or(0);
            dict.set("Ff", Object::Integer(flags | FF_READ_ONLY));

            for widget in widgets {
                self.field_dict_mut(widget)?
                    .set("F", Object::Integer(ANNOT_PRINT));
            }
        }

        // Dropping the AcroForm entry removes form interactivity; the widget
        // annotations keep their baked appearance streams.
        let root_id = self
            .doc
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|e| FormError::RenderFailed(format!("catalog lookup: {e}")))?;
        self.field_dict_mut(root_id)?.remove(b"AcroForm");

        self.flattened = true;
        Ok(())
    }

    fn into_bytes(mut self: Box<Self>) -> Result<Vec<u8>, FormError> {
        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| FormError::RenderFailed(e.to_string()))?;
        Ok(bytes)
    }
}

/// The template's top-level /AcroForm/Fields references.
fn top_level_field_ids(doc: &Document) -> Result<Vec<ObjectId>, FormError> {
    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| FormError::ReadFailed(format!("catalog lookup: {e}")))?;
    let catalog = doc
        .get_object(root_id)
        .and_then(Object::as_dict)
        .map_err(|e| FormError::ReadFailed(format!("catalog object: {e}")))?;

    let acroform = match catalog.get(b"AcroForm") {
        Ok(obj) => resolve(doc, obj),
        Err(_) => {
            return Err(FormError::NotFillable(
                "template has no AcroForm dictionary".to_string(),
            ));
        }
    };
    let acroform = acroform
        .as_dict()
        .map_err(|e| FormError::NotFillable(format!("AcroForm is not a dictionary: {e}")))?;

    let fields = acroform
        .get(b"Fields")
        .and_then(Object::as_array)
        .map_err(|e| FormError::NotFillable(format!("AcroForm has no Fields array: {e}")))?;

    fields
        .iter()
        .map(|obj| {
            obj.as_reference()
                .map_err(|e| FormError::NotFillable(format!("field entry is not a reference: {e}")))
        })
        .collect()
}

/// Walk one field subtree, registering terminal fields under their names.
///
/// /FT and /Ff are inheritable, so they are threaded down the recursion.
fn collect_fields(
    doc: &Document,
    field_id: ObjectId,
    inherited_ft: Option<Vec<u8>>,
    inherited_ff: Option<i64>,
    out: &mut HashMap<String, FieldSlot>,
) -> Result<(), FormError> {
    let dict = doc
        .get_object(field_id)
        .and_then(Object::as_dict)
        .map_err(|e| FormError::NotFillable(format!("field object {field_id:?}: {e}")))?;

    let ft = dict
        .get(b"FT")
        .and_then(Object::as_name)
        .map(<[u8]>::to_vec)
        .ok()
        .or(inherited_ft);
    let ff = dict
        .get(b"Ff")
        .and_then(Object::as_i64)
        .ok()
        .or(inherited_ff);

    let name = dict
        .get(b"T")
        .and_then(Object::as_str)
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .ok();

    let kid_ids: Vec<ObjectId> = dict
        .get(b"Kids")
        .and_then(Object::as_array)
        .map(|kids| kids.iter().filter_map(|k| k.as_reference().ok()).collect())
        .unwrap_or_default();

    // Kids carrying their own /T are child fields, not widgets of this one.
    let kids_are_fields = !kid_ids.is_empty()
        && kid_ids.iter().all(|id| {
            doc.get_object(*id)
                .and_then(Object::as_dict)
                .map(|d| d.has(b"T"))
                .unwrap_or(false)
        });

    if kids_are_fields {
        for kid in kid_ids {
            collect_fields(doc, kid, ft.clone(), ff, out)?;
        }
        return Ok(());
    }

    let Some(name) = name else {
        // Anonymous terminal node; nothing can target it by mapping key.
        return Ok(());
    };

    let widgets = if kid_ids.is_empty() {
        vec![field_id]
    } else {
        kid_ids
    };

    let flags = ff.unwrap_or(0);
    let (kind, data) = match ft.as_deref() {
        Some(b"Tx") => (FieldKind::Text, SlotData::Text),
        Some(b"Btn") if flags & FF_PUSHBUTTON != 0 => (FieldKind::Unknown, SlotData::Unknown),
        Some(b"Btn") if flags & FF_RADIO != 0 => {
            let options = radio_options(doc, dict, &widgets);
            (FieldKind::RadioGroup, SlotData::Radio { options })
        }
        Some(b"Btn") => {
            let on_state = widgets
                .iter()
                .find_map(|w| on_state_of(doc, *w))
                .unwrap_or_else(|| b"Yes".to_vec());
            (FieldKind::CheckBox, SlotData::Check { on_state })
        }
        _ => (FieldKind::Unknown, SlotData::Unknown),
    };

    out.insert(
        name,
        FieldSlot {
            field_id,
            kind,
            widgets,
            data,
        },
    );
    Ok(())
}

/// Pair each radio widget with its appearance state and export value.
fn radio_options(doc: &Document, field_dict: &Dictionary, widgets: &[ObjectId]) -> Vec<RadioOption> {
    let exports: Vec<Option<String>> = field_dict
        .get(b"Opt")
        .and_then(Object::as_array)
        .map(|opts| {
            opts.iter()
                .map(|o| {
                    o.as_str()
                        .map(|b| String::from_utf8_lossy(b).into_owned())
                        .ok()
                })
                .collect()
        })
        .unwrap_or_default();

    widgets
        .iter()
        .enumerate()
        .filter_map(|(index, widget)| {
            let state = on_state_of(doc, *widget)?;
            let export = exports
                .get(index)
                .cloned()
                .flatten()
                .unwrap_or_else(|| String::from_utf8_lossy(&state).into_owned());
            Some(RadioOption {
                state,
                export,
                widget: *widget,
            })
        })
        .collect()
}

/// The widget's non-Off appearance state name, from /AP /N.
fn on_state_of(doc: &Document, widget: ObjectId) -> Option<Vec<u8>> {
    let dict = doc.get_object(widget).and_then(Object::as_dict).ok()?;
    let ap = resolve(doc, dict.get(b"AP").ok()?).as_dict().ok()?;
    let normal = resolve(doc, ap.get(b"N").ok()?).as_dict().ok()?;
    normal
        .iter()
        .map(|(name, _)| &name[..])
        .find(|name| *name != b"Off")
        .map(<[u8]>::to_vec)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

fn widget_rect(dict: &Dictionary) -> Option<(f32, f32)> {
    let rect = dict.get(b"Rect").and_then(Object::as_array).ok()?;
    let mut coords = rect.iter().filter_map(as_number);
    let (x1, y1, x2, y2) = (coords.next()?, coords.next()?, coords.next()?, coords.next()?);
    Some(((x2 - x1).abs(), (y2 - y1).abs()))
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn escape_pdf_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
