//! End-to-end export: layout, frame signal, rasterize, save.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use card_core::{
    layout_card, Artifact, CardStyle, ElementId, ExportError, Notice, Notifier, QuoteArtifact,
    Scene,
};
use card_export::{
    export_filename, CardExporter, DirectoryDownloads, ExportConfig, ExportPipeline,
    RenderSurface,
};

#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().expect("lock"))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("lock").push(notice);
    }
}

fn exporter() -> CardExporter {
    CardExporter::new(ExportConfig {
        load_system_fonts: false,
        ..ExportConfig::default()
    })
}

fn quote() -> Artifact {
    QuoteArtifact::new(
        "মানুষ তার স্বপ্নের চেয়েও বড়।",
        "হুমায়ূন আহমেদ",
        "inspiration",
        true,
    )
    .expect("quote")
    .into()
}

fn pipeline(
    dir: &std::path::Path,
) -> (ExportPipeline<DirectoryDownloads>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline = ExportPipeline::new(
        exporter(),
        DirectoryDownloads::new(dir),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    (pipeline, notifier)
}

#[tokio::test]
async fn export_waits_for_presented_frame() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (pipeline, notifier) = pipeline(tmp.path());
    let pipeline = Arc::new(pipeline);

    let surface = Arc::new(RenderSurface::new(Scene::new(800.0, 900.0)));
    let node = ElementId::named("quote-card-capture");
    let artifact = quote();
    surface
        .update(|scene| layout_card(scene, &node, &artifact, &CardStyle::default(), (0.0, 0.0)))
        .expect("layout");

    let filename = export_filename(&artifact);
    let task = {
        let pipeline = Arc::clone(&pipeline);
        let surface = Arc::clone(&surface);
        let node = node.clone();
        let filename = filename.clone();
        tokio::spawn(async move { pipeline.export_as_image(&surface, &node, &filename).await })
    };

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(!task.is_finished(), "export must wait for the frame");
    assert!(!tmp.path().join(&filename).exists());

    surface.present();
    let path = tokio::time::timeout(Duration::from_secs(30), task)
        .await
        .expect("export finished")
        .expect("join")
        .expect("export");

    assert_eq!(path, tmp.path().join("saatmishaali-হুমায়ূন-আহমেদ-quote.png"));
    let bytes = std::fs::read(&path).expect("read png");
    let pixmap = tiny_skia::Pixmap::decode_png(&bytes).expect("decode");

    let card = surface.snapshot();
    let bounds = card.get_element(&node).expect("card").transform;
    assert_eq!(pixmap.width(), (bounds.width * 2.0).ceil() as u32);
    assert_eq!(pixmap.height(), (bounds.height * 2.0).ceil() as u32);
    assert!(pixmap.pixels().iter().all(|p| p.alpha() == 255));
    assert!(notifier.take().is_empty());
}

#[tokio::test]
async fn missing_node_notifies_and_writes_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out");
    let (pipeline, notifier) = pipeline(&out);

    // Never presented: the call must not hang waiting for a frame.
    let surface = RenderSurface::new(Scene::new(800.0, 900.0));
    surface.update(|_| ());

    let err = tokio::time::timeout(
        Duration::from_secs(1),
        pipeline.export_as_image(&surface, &ElementId::named("quote-card-capture"), "x.png"),
    )
    .await
    .expect("no wait")
    .unwrap_err();

    assert!(matches!(err, ExportError::NodeNotFound(_)));
    assert!(!out.exists());
    assert_eq!(
        notifier.take(),
        vec![Notice::Error(
            "Something went wrong while generating the image. Please try again or take a screenshot."
                .to_string()
        )]
    );
}

#[tokio::test]
async fn save_failure_is_reported() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, b"not a dir").expect("write");
    let (pipeline, notifier) = pipeline(&blocker);

    let surface = RenderSurface::new(Scene::new(800.0, 900.0));
    let node = ElementId::named("quote-card-capture");
    surface
        .update(|scene| layout_card(scene, &node, &quote(), &CardStyle::default(), (0.0, 0.0)))
        .expect("layout");
    surface.present();

    let err = pipeline
        .export_as_image(&surface, &node, "card.png")
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Save { ref filename, .. } if filename == "card.png"));
    assert_eq!(notifier.take().len(), 1);
}
