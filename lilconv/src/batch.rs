//! Converting every material of a document, one at a time, in document order.

use toon_xml::{Material, MaterialDocument, Named, TextureRef};
use tracing::{info, info_span, warn};

use crate::ao::TextureBaker;
use crate::apply::{apply, ApplyOutcome};
use crate::classify::classify;
use crate::config::AoPolicy;
use crate::destination::LilMaterial;
use crate::messages::{Language, Text};
use crate::slots::TargetPropertySet;
use crate::translate::{translate, PendingAoMask, Translation};

/// A blocking yes/no question put to the user.
pub trait Confirm {
    fn confirm(&mut self, message: &str, yes: &str, no: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialOutcome {
    Converted {
        apply: ApplyOutcome,
        baked: Option<TextureRef>,
    },
    Unsupported,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchReport {
    pub converted: Vec<String>,
    pub unsupported: Vec<String>,
    /// Converted, but onto the previous shader because the variant doesn't exist.
    pub shader_missing: Vec<String>,
    pub baked: Vec<TextureRef>,
}

impl BatchReport {
    pub fn merge(&mut self, other: BatchReport) {
        self.converted.extend(other.converted);
        self.unsupported.extend(other.unsupported);
        self.shader_missing.extend(other.shader_missing);
        self.baked.extend(other.baked);
    }

    /// The single end-of-batch message about skipped materials, if any were skipped.
    pub fn unsupported_message(&self, language: Language) -> Option<String> {
        if self.unsupported.is_empty() {
            None
        } else {
            Some(language.unsupported_report(&self.unsupported))
        }
    }
}

pub struct Converter<B, C> {
    language: Language,
    ao_bake: AoPolicy,
    baker: B,
    confirm: C,
}

impl<B: TextureBaker, C: Confirm> Converter<B, C> {
    pub fn new(language: Language, ao_bake: AoPolicy, baker: B, confirm: C) -> Self {
        Self {
            language,
            ao_bake,
            baker,
            confirm,
        }
    }

    pub fn convert_document(&mut self, doc: &mut MaterialDocument) -> BatchReport {
        let mut report = BatchReport::default();

        for material in &mut doc.materials {
            let name = material.name().to_owned();
            match self.convert_material(material) {
                MaterialOutcome::Converted { apply, baked } => {
                    if !apply.shader_applied {
                        report.shader_missing.push(name.clone());
                    }
                    report.converted.push(name);
                    report.baked.extend(baked);
                }
                MaterialOutcome::Unsupported => report.unsupported.push(name),
            }
        }

        report
    }

    pub fn convert_material(&mut self, material: &mut Material) -> MaterialOutcome {
        let _span = info_span!("material", name = material.name()).entered();

        let (flags, family) = classify(&*material);
        if !family.is_supported() {
            warn!(shader = ?material.shader, "unsupported shader, skipped");
            return MaterialOutcome::Unsupported;
        }

        let (set, baked) = match translate(&*material, &flags, family) {
            Translation::Complete(set) => (set, None),
            Translation::NeedsAoBake(pending) => self.resolve_ao(pending),
        };

        let outcome = apply(&set, &mut LilMaterial::new(material));
        info!(shader = %outcome.shader, written = outcome.written, "converted");

        MaterialOutcome::Converted {
            apply: outcome,
            baked,
        }
    }

    /// Returns the record and the texture baked for it, if any.
    fn resolve_ao(&mut self, pending: PendingAoMask) -> (TargetPropertySet, Option<TextureRef>) {
        info!(
            first = %pending.first(),
            second = %pending.second(),
            policy = ?self.ao_bake,
            "two AO masks need packing"
        );
        let bake = match self.ao_bake {
            AoPolicy::Always => true,
            AoPolicy::Never => false,
            AoPolicy::Ask => self.confirm.confirm(
                self.language.text(Text::ConvertAoMask),
                self.language.text(Text::Yes),
                self.language.text(Text::No),
            ),
        };

        if bake {
            let set = pending.accept(&mut self.baker);
            let baked = set.shadow_border_mask.clone();
            (set, baked)
        } else {
            (pending.decline(), None)
        }
    }
}
