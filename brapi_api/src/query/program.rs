use crate::types::ProgramType;

use super::{
    common::{PagedQuery, QueryCommon},
    Query,
};

/// Typed filters understood by `GET /programs`.
#[derive(Clone, Debug, Default)]
pub struct ProgramQuery {
    pub common: QueryCommon,
    pub program_db_ids: Vec<String>,
    pub program_name: Option<String>,
    pub abbreviation: Option<String>,
    pub program_type: Option<ProgramType>,
    pub common_crop_name: Option<String>,
}

impl Query for ProgramQuery {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for id in self.program_db_ids.iter() {
            pairs.push(("programDbId".to_string(), id.clone()));
        }
        if let Some(name) = &self.program_name {
            pairs.push(("programName".to_string(), name.clone()));
        }
        if let Some(abbreviation) = &self.abbreviation {
            pairs.push(("abbreviation".to_string(), abbreviation.clone()));
        }
        if let Some(program_type) = self.program_type {
            pairs.push(("programType".to_string(), program_type.to_string()));
        }
        if let Some(crop) = &self.common_crop_name {
            pairs.push(("commonCropName".to_string(), crop.clone()));
        }
        self.common.push_pairs(&mut pairs);
        pairs
    }
}

impl PagedQuery for ProgramQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl ProgramQuery {
    pub fn with_program_db_id(mut self, id: &str) -> Self {
        self.program_db_ids.push(id.to_string());
        self
    }

    pub fn with_program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    pub fn with_abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviation = Some(abbreviation.to_string());
        self
    }

    pub fn with_program_type(mut self, program_type: ProgramType) -> Self {
        self.program_type = Some(program_type);
        self
    }

    pub fn with_common_crop_name(mut self, crop: &str) -> Self {
        self.common_crop_name = Some(crop.to_string());
        self
    }
}
