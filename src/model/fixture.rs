use super::drive::Drive;
use super::node::{Node, NodeId, NodeKind};
use anyhow::{Context, Result};

/// Build the built-in sample drive
///
/// The table is the fixed demo data set; there is no live storage behind
/// it. Child order here is the order the browser shows.
pub fn sample_drive() -> Result<Drive> {
    let root = NodeId::from("root");
    let documents = NodeId::from("documents");
    let images = NodeId::from("images");
    let projects = NodeId::from("projects");
    let project1 = NodeId::from("project1");

    let nodes = vec![
        Node::folder(
            "root",
            "My Drive",
            None,
            vec![
                documents.clone(),
                images.clone(),
                projects.clone(),
                NodeId::from("file1"),
                NodeId::from("file2"),
            ],
        ),
        Node::folder(
            "documents",
            "Documents",
            Some(root.clone()),
            vec![
                NodeId::from("doc1"),
                NodeId::from("doc2"),
                NodeId::from("doc3"),
            ],
        ),
        Node::leaf(
            "doc1",
            "Resume.docx",
            NodeKind::Document,
            documents.clone(),
            Some("245 KB"),
            Some("May 12, 2023"),
        ),
        Node::leaf(
            "doc2",
            "Meeting Notes.docx",
            NodeKind::Document,
            documents.clone(),
            Some("125 KB"),
            Some("Jun 3, 2023"),
        ),
        Node::leaf(
            "doc3",
            "Budget 2023.xlsx",
            NodeKind::Spreadsheet,
            documents,
            Some("1.2 MB"),
            Some("Apr 28, 2023"),
        ),
        Node::folder(
            "images",
            "Images",
            Some(root.clone()),
            vec![NodeId::from("img1"), NodeId::from("img2")],
        ),
        Node::leaf(
            "img1",
            "Vacation.jpg",
            NodeKind::Image,
            images.clone(),
            Some("3.4 MB"),
            Some("Jul 15, 2023"),
        ),
        Node::leaf(
            "img2",
            "Profile Picture.png",
            NodeKind::Image,
            images,
            Some("2.1 MB"),
            Some("Aug 2, 2023"),
        ),
        Node::folder(
            "projects",
            "Projects",
            Some(root.clone()),
            vec![project1.clone(), NodeId::from("project2")],
        ),
        Node::folder(
            "project1",
            "Website Redesign",
            Some(projects.clone()),
            vec![NodeId::from("proj1file1"), NodeId::from("proj1file2")],
        ),
        Node::leaf(
            "proj1file1",
            "Wireframes.pdf",
            NodeKind::Pdf,
            project1.clone(),
            Some("8.3 MB"),
            Some("Jul 23, 2023"),
        ),
        Node::leaf(
            "proj1file2",
            "Design Assets.zip",
            NodeKind::Archive,
            project1,
            Some("45.2 MB"),
            Some("Jul 25, 2023"),
        ),
        Node::folder("project2", "Mobile App", Some(projects), vec![]),
        Node::leaf(
            "file1",
            "Presentation.pptx",
            NodeKind::Presentation,
            root.clone(),
            Some("5.7 MB"),
            Some("Jun 12, 2023"),
        ),
        Node::leaf(
            "file2",
            "Important Notes.txt",
            NodeKind::Text,
            root,
            Some("12 KB"),
            Some("Aug 10, 2023"),
        ),
    ];

    Drive::new(nodes).context("built-in sample drive failed validation")
}
