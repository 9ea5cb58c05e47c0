use crate::error::Result;

/// Extra check applied to a downloaded release artifact before it is trusted.
///
/// What is checked (checksum, signature, ...) is up to the implementation.
/// Closures of the form `Fn(&[u8]) -> Result<()>` implement this trait.
pub trait Validator: Send + Sync {
    /// Returns `Ok(())` if the artifact passes, otherwise
    /// [`UpdaterError::Validation`](crate::UpdaterError::Validation).
    fn validate(&self, artifact: &[u8]) -> Result<()>;
}

impl<F> Validator for F
where
    F: Fn(&[u8]) -> Result<()> + Send + Sync,
{
    fn validate(&self, artifact: &[u8]) -> Result<()> {
        self(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdaterError;

    struct NonEmpty;

    impl Validator for NonEmpty {
        fn validate(&self, artifact: &[u8]) -> Result<()> {
            if artifact.is_empty() {
                return Err(UpdaterError::Validation("artifact is empty".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn trait_object_dispatch() {
        let validator: Box<dyn Validator> = Box::new(NonEmpty);
        assert!(validator.validate(b"binary").is_ok());
        assert!(matches!(
            validator.validate(b""),
            Err(UpdaterError::Validation(_))
        ));
    }

    #[test]
    fn closures_are_validators() {
        let starts_with_elf = |artifact: &[u8]| -> Result<()> {
            if artifact.starts_with(b"\x7fELF") {
                Ok(())
            } else {
                Err(UpdaterError::Validation("not an ELF binary".to_string()))
            }
        };
        assert!(starts_with_elf.validate(b"\x7fELF\x02\x01").is_ok());
        assert!(starts_with_elf.validate(b"MZ").is_err());
    }
}
