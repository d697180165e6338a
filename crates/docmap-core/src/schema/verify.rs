use super::{FieldTy, ModelSchema};
use crate::{Error, Result};

impl ModelSchema {
    /// Checks that every extract group targets declared fields and that no
    /// group extracts into itself, directly or through other groups.
    pub(crate) fn verify(&self) -> Result<()> {
        for field in &self.fields {
            let FieldTy::Extract(extract) = &field.ty else {
                continue;
            };

            for target in extract.targets() {
                if self.field(target).is_none() {
                    return Err(Error::configuration(format!(
                        "extract directive on `{}` targets unknown field `{target}`",
                        self.full_name(field)
                    )));
                }
            }
        }

        for field in &self.fields {
            if field.ty.is_extract() {
                self.verify_acyclic(&field.name.app_name, &mut vec![])?;
            }
        }

        Ok(())
    }

    fn verify_acyclic<'a>(&'a self, name: &'a str, path: &mut Vec<&'a str>) -> Result<()> {
        if path.contains(&name) {
            path.push(name);
            return Err(Error::configuration(format!(
                "extract directives on `{}` form a cycle: {}",
                self.name(),
                path.join(" -> ")
            )));
        }

        let Some(extract) = self.field(name).and_then(|field| field.ty.as_extract()) else {
            return Ok(());
        };

        path.push(name);
        for target in extract.targets() {
            self.verify_acyclic(target, path)?;
        }
        path.pop();

        Ok(())
    }
}
