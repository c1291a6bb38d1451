use log::info;
use crate::error::LaunchError;
use crate::model::LaunchRequest;

/// Opens the target with the OS default handler without waiting for it.
///
/// History is recorded by the caller before this runs, so a failed launch
/// still counts as a use.
pub fn launch(request: &LaunchRequest) -> Result<(), LaunchError> {
    let target = request.target_path.trim();
    if target.is_empty() {
        return Err(LaunchError::EmptyPath);
    }

    open::that_detached(target).map_err(|source| LaunchError::Open {
        path: target.to_string(),
        source,
    })?;
    info!("Executor: opened {}", target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_target_is_rejected() {
        let request = LaunchRequest { target_path: "  ".to_string() };
        assert!(matches!(launch(&request), Err(LaunchError::EmptyPath)));
    }
}
