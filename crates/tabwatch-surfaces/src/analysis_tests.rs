use tabwatch_protocols::{AnalysisStatus, SurfaceMessage, SurfaceReply};

use super::AnalysisSurface;

#[test]
fn starts_waiting_for_a_screenshot() {
    let surface = AnalysisSurface::new();
    assert_eq!(surface.view().status, AnalysisStatus::Waiting);
    assert_eq!(surface.view().message, "Waiting for screenshot...");
    assert!(surface.view().result.is_none());
}

#[test]
fn status_updates_are_rendered() {
    let mut surface = AnalysisSurface::new();
    let reply = surface.handle_message(SurfaceMessage::UpdateAnalysisStatus {
        status: AnalysisStatus::InProgress,
        message: "Analyzing screenshot...".to_string(),
    });

    assert_eq!(reply, Some(SurfaceReply::Received { received: true }));
    assert_eq!(surface.view().status, AnalysisStatus::InProgress);
    assert_eq!(surface.view().message, "Analyzing screenshot...");
}

#[test]
fn result_completes_the_analysis() {
    let mut surface = AnalysisSurface::new();
    surface.handle_message(SurfaceMessage::UpdateAnalysisStatus {
        status: AnalysisStatus::InProgress,
        message: "Analyzing screenshot...".to_string(),
    });
    surface.handle_message(SurfaceMessage::UpdateAnalysisResult {
        result: "A news page with stock charts".to_string(),
    });

    assert_eq!(surface.view().status, AnalysisStatus::Complete);
    assert_eq!(surface.view().message, "Analysis complete");
    assert_eq!(
        surface.view().result.as_deref(),
        Some("A news page with stock charts")
    );
}

#[test]
fn error_status_keeps_previous_result() {
    let mut surface = AnalysisSurface::new();
    surface.handle_message(SurfaceMessage::UpdateAnalysisResult {
        result: "First result".to_string(),
    });
    surface.handle_message(SurfaceMessage::UpdateAnalysisStatus {
        status: AnalysisStatus::Error,
        message: "Analysis failed: connection refused".to_string(),
    });

    assert_eq!(surface.view().status, AnalysisStatus::Error);
    assert_eq!(surface.view().result.as_deref(), Some("First result"));
}

#[test]
fn content_updates_are_ignored() {
    let mut surface = AnalysisSurface::new();
    let reply = surface.handle_message(SurfaceMessage::GetContent);
    assert!(reply.is_none());
    assert_eq!(surface.view().status, AnalysisStatus::Waiting);
}
