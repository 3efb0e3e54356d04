use std::collections::HashMap;

use strum::{Display, EnumIter, EnumString};

/// Diagnostic imaging type a prediction is requested for. The lowercase
/// serialization doubles as the `/predict/{modality}` path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    Ultrasound,
    Mammogram,
    Mri,
    Combined,
}

impl Modality {
    /// Caption shown for this modality in the dropdown.
    pub fn selector_caption(&self) -> &'static str {
        match self {
            Modality::Ultrasound => "Ultrasound (Separate)",
            Modality::Mammogram => "Mammogram (Separate)",
            Modality::Mri => "MRI (Separate)",
            Modality::Combined => "Combined Prediction",
        }
    }

    /// Heading rendered above the upload form.
    pub fn form_title(&self) -> &'static str {
        match self {
            Modality::Ultrasound => "Ultrasound Prediction",
            Modality::Mammogram => "Mammogram Prediction",
            Modality::Mri => "MRI Prediction",
            Modality::Combined => "Combined Prediction",
        }
    }
}

/// One named file-upload field of the prediction form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSpec {
    /// Multipart field name expected by the service.
    pub name: &'static str,
    pub label: &'static str,
    /// `accept` filter for the file input.
    pub accept: &'static str,
    pub required: bool,
}

const ULTRASOUND_SLOTS: &[SlotSpec] = &[SlotSpec {
    name: "file",
    label: "Ultrasound Image:",
    accept: "image/*",
    required: true,
}];

const MAMMOGRAM_SLOTS: &[SlotSpec] = &[
    SlotSpec {
        name: "image",
        label: "Mammogram Image:",
        accept: "image/*",
        required: true,
    },
    SlotSpec {
        name: "breast_mask",
        label: "Breast Mask:",
        accept: "image/*",
        required: true,
    },
    SlotSpec {
        name: "dense_mask",
        label: "Dense Mask:",
        accept: "image/*",
        required: true,
    },
];

const MRI_SLOTS: &[SlotSpec] = &[SlotSpec {
    name: "file",
    label: "MRI CSV:",
    accept: ".csv",
    required: true,
}];

const COMBINED_SLOTS: &[SlotSpec] = &[
    SlotSpec {
        name: "ultrasound_file",
        label: "Ultrasound Image (Optional):",
        accept: "image/*",
        required: false,
    },
    SlotSpec {
        name: "mammogram_image",
        label: "Mammogram Image (Optional):",
        accept: "image/*",
        required: false,
    },
    SlotSpec {
        name: "mammogram_breast_mask",
        label: "Breast Mask (Optional):",
        accept: "image/*",
        required: false,
    },
    SlotSpec {
        name: "mammogram_dense_mask",
        label: "Dense Mask (Optional):",
        accept: "image/*",
        required: false,
    },
    SlotSpec {
        name: "mri_file",
        label: "MRI CSV (Optional):",
        accept: ".csv",
        required: false,
    },
];

/// File slots of the upload form for a modality, in display order.
pub fn required_slots(modality: Modality) -> &'static [SlotSpec] {
    match modality {
        Modality::Ultrasound => ULTRASOUND_SLOTS,
        Modality::Mammogram => MAMMOGRAM_SLOTS,
        Modality::Mri => MRI_SLOTS,
        Modality::Combined => COMBINED_SLOTS,
    }
}

/// Slots that actually hold a file, in form order. The multipart body is
/// built from exactly these pairs; unset optional slots never produce a
/// field.
pub fn present_slots<'a, F>(
    modality: Modality,
    files: &'a HashMap<String, F>,
) -> Vec<(&'static str, &'a F)> {
    required_slots(modality)
        .iter()
        .filter_map(|slot| files.get(slot.name).map(|file| (slot.name, file)))
        .collect()
}
