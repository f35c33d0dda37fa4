use crate::constants::{
    CLASSIFICATION_TYPE, INTEROPERABLE_TYPE, MAX_LIMIT, ROUTED_SEARCH_TEXT,
};
use crate::errors::EndpointError;
use crate::params::Params;
use crate::utils::encode_path_segment;
use clap::ValueEnum;
use std::fmt::{Display, Formatter};

macro_rules! value_set {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
        pub enum $name {
            $(
                #[value(name = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

value_set!(SearchType {
    StartsWith => "startswith",
    Contains => "contains",
    Equals => "equals",
});

value_set!(DoseConceptType {
    PrescribableDrugs => "PrescribableDrugs",
    DispensableGenerics => "DispensableGenerics",
    PackagedDrugs => "PackagedDrugs",
});

value_set!(RxNormConceptType {
    DispensableDrugs => "DispensableDrugs",
    DispensableGenerics => "DispensableGenerics",
    PackagedDrugs => "PackagedDrugs",
});

value_set!(ClassificationType {
    Etc => "ETC",
    Usc => "USC",
    Ahfs => "AHFS",
});

value_set!(InteroperableType {
    RxNormSemanticClinicalDrug => "RxNormSemanticClinicalDrug",
    RxNormPreciseIngredient => "RxNormPreciseIngredient",
});

/// One of the eight supported API operations with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Search {
        text: String,
        search_type: SearchType,
        limit: u32,
        offset: u32,
    },
    Details {
        drug_id: String,
    },
    Interactions {
        drug_id: String,
    },
    Dosing {
        concept_type: DoseConceptType,
        drug_id: String,
    },
    Contraindications {
        drug_id: String,
    },
    RxNormConcepts {
        concept_type: RxNormConceptType,
        drug_id: String,
    },
    InteroperableLinks {
        classification_id: String,
        classification_type: ClassificationType,
        interoperable_type: InteroperableType,
    },
    RoutedDoseFormDrugs {
        search_text: Option<String>,
        limit: u32,
        offset: u32,
    },
}

impl Endpoint {
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Search { .. } => "Drug Search",
            Endpoint::Details { .. } => "Drug Details",
            Endpoint::Interactions { .. } => "Drug Interactions",
            Endpoint::Dosing { .. } => "Dosing Information",
            Endpoint::Contraindications { .. } => "Contraindications",
            Endpoint::RxNormConcepts { .. } => "RxNorm Concepts",
            Endpoint::InteroperableLinks { .. } => "Interoperable Drug Links",
            Endpoint::RoutedDoseFormDrugs { .. } => "Routed Dose Form Drugs",
        }
    }

    /// ```rust
    /// use fdb_rs::Endpoint;
    ///
    /// let endpoint = Endpoint::Interactions { drug_id: "583214".to_string() };
    /// assert_eq!(endpoint.path().unwrap(), "PrescribableDrugs/583214/Interactions");
    /// ```
    pub fn path(&self) -> Result<String, EndpointError> {
        let path = match self {
            Endpoint::Search { .. } => "PrescribableDrugs".to_string(),
            Endpoint::Details { drug_id } => {
                format!("PrescribableDrugs/{}", segment("Drug ID", drug_id)?)
            }
            Endpoint::Interactions { drug_id } => {
                format!("PrescribableDrugs/{}/Interactions", segment("Drug ID", drug_id)?)
            }
            Endpoint::Dosing {
                concept_type,
                drug_id,
            } => format!(
                "{}/{}/DoseRecords",
                concept_type,
                segment("Drug ID", drug_id)?
            ),
            Endpoint::Contraindications { drug_id } => format!(
                "PrescribableDrugs/{}/Contraindications",
                segment("Drug ID", drug_id)?
            ),
            Endpoint::RxNormConcepts {
                concept_type,
                drug_id,
            } => format!(
                "{}/{}/RxNormConcepts",
                concept_type,
                segment("Drug ID", drug_id)?
            ),
            Endpoint::InteroperableLinks {
                classification_id, ..
            } => format!(
                "Classifications/{}/InteroperableDrugLinks",
                segment("Classification ID", classification_id)?
            ),
            Endpoint::RoutedDoseFormDrugs { .. } => "RoutedDoseFormDrugs".to_string(),
        };

        Ok(path)
    }

    /// Query parameters for this operation, led by `callSystemName` and `callid`.
    pub fn params(&self, call_id: &str) -> Result<Params, EndpointError> {
        let mut params = Params::with_call_id(call_id);

        match self {
            Endpoint::Search {
                text,
                search_type,
                limit,
                offset,
            } => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(EndpointError::EmptySearchText);
                }
                params
                    .search_text(text)
                    .search_type(search_type.as_str())
                    .limit(check_limit(*limit)?)
                    .offset(*offset);
            }
            Endpoint::InteroperableLinks {
                classification_type,
                interoperable_type,
                ..
            } => {
                params
                    .add_param(CLASSIFICATION_TYPE, classification_type)
                    .add_param(INTEROPERABLE_TYPE, interoperable_type);
            }
            Endpoint::RoutedDoseFormDrugs {
                search_text,
                limit,
                offset,
            } => {
                params.limit(check_limit(*limit)?).offset(*offset);
                if let Some(text) = search_text.as_deref().map(str::trim) {
                    if !text.is_empty() {
                        params.add_param(ROUTED_SEARCH_TEXT, text);
                    }
                }
            }
            _ => {}
        }

        Ok(params)
    }
}

fn segment(name: &'static str, value: &str) -> Result<String, EndpointError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EndpointError::EmptyIdentifier(name));
    }

    Ok(encode_path_segment(value))
}

fn check_limit(limit: u32) -> Result<u32, EndpointError> {
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(EndpointError::LimitOutOfRange(limit))
    }
}
