use super::*;
use tabwatch_protocols::AnalysisStatus;

#[tokio::test]
async fn test_register_and_send() {
    let registry = SurfaceRegistry::new();
    let (tx, mut rx) = mpsc::channel(4);
    let tab = TabId(1);

    registry.register(tab, tx);
    assert!(registry.contains(tab));

    registry.send(tab, SurfaceMessage::GetContent).unwrap();
    assert_eq!(rx.recv().await, Some(SurfaceMessage::GetContent));
}

#[tokio::test]
async fn test_send_to_unknown_tab() {
    let registry = SurfaceRegistry::new();
    let result = registry.send(TabId(9), SurfaceMessage::GetContent);
    assert!(matches!(
        result,
        Err(CoordinatorError::SurfaceNotRegistered(_))
    ));
}

#[tokio::test]
async fn test_send_to_closed_surface() {
    let registry = SurfaceRegistry::new();
    let (tx, rx) = mpsc::channel(4);
    let tab = TabId(2);
    registry.register(tab, tx);
    drop(rx);

    let result = registry.send(
        tab,
        SurfaceMessage::UpdateAnalysisStatus {
            status: AnalysisStatus::InProgress,
            message: "Analyzing...".to_string(),
        },
    );
    assert!(matches!(result, Err(CoordinatorError::SurfaceUnavailable(_))));
}

#[tokio::test]
async fn test_unregister() {
    let registry = SurfaceRegistry::new();
    let (tx, _rx) = mpsc::channel(4);
    let tab = TabId(3);
    registry.register(tab, tx);
    registry.unregister(tab);
    assert!(!registry.contains(tab));
    assert!(registry.is_empty());

    // Unregistering again is a no-op.
    registry.unregister(tab);
}
