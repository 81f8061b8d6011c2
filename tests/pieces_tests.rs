//! Catalog and piece tests - shapes, rotations, registration

use blockfall::core::{generate_rotations, standard_shape, CoreError, Piece, PieceCatalog, ShapeMatrix};
use blockfall::types::{PieceKind, RotationDirection};

// ============== Shape Tests ==============

#[test]
fn test_standard_shapes_have_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(standard_shape(kind).cell_count(), 4, "{kind}");
    }
}

#[test]
fn test_i_piece_rotations() {
    let rotations = PieceCatalog::standard().rotations_of(PieceKind::I).unwrap();
    assert_eq!(rotations[0].to_rows()[0], vec![1, 1, 1, 1]);
    // Clockwise: the top row becomes the right column
    assert!((0..4).all(|r| rotations[1].get(r, 3)));
    assert_eq!(rotations[2].to_rows()[3], vec![1, 1, 1, 1]);
    assert!((0..4).all(|r| rotations[3].get(r, 0)));
}

#[test]
fn test_o_piece_rotation_invariant() {
    let rotations = PieceCatalog::standard().rotations_of(PieceKind::O).unwrap();
    for rotation in rotations {
        assert_eq!(rotation, &rotations[0]);
    }
}

#[test]
fn test_non_square_rotation_swaps_dimensions() {
    let bar = ShapeMatrix::from_rows(&[&[1, 1, 1]]).unwrap();
    let rotations = generate_rotations(bar);
    assert_eq!((rotations[0].rows(), rotations[0].cols()), (1, 3));
    assert_eq!((rotations[1].rows(), rotations[1].cols()), (3, 1));
    assert_eq!(rotations[1].to_rows(), vec![vec![1], vec![1], vec![1]]);
}

#[test]
fn test_t_piece_clockwise() {
    let t = standard_shape(PieceKind::T);
    let cw = t.rotated_cw();
    assert_eq!(
        cw.to_rows(),
        vec![vec![0, 0, 1], vec![0, 1, 1], vec![0, 0, 1]]
    );
}

#[test]
fn test_from_rows_rejects_bad_shapes() {
    assert!(matches!(
        ShapeMatrix::from_rows(&[]),
        Err(CoreError::InvalidShape(_))
    ));
    assert!(ShapeMatrix::from_rows(&[&[1, 1], &[1]]).is_err());
    assert!(ShapeMatrix::from_rows(&[&[1, 1, 1, 1, 1]]).is_err());
    assert!(ShapeMatrix::from_rows(&[&[0, 0]]).is_err());
    assert!(ShapeMatrix::from_rows(&[&[2]]).is_err());
}

// ============== Catalog Tests ==============

#[test]
fn test_standard_catalog_contains_all_kinds() {
    let catalog = PieceCatalog::standard();
    let kinds: Vec<_> = catalog.kinds().collect();
    assert_eq!(kinds, PieceKind::ALL.to_vec());
}

#[test]
fn test_register_duplicate_fails() {
    let mut catalog = PieceCatalog::new();
    catalog
        .register(PieceKind::T, standard_shape(PieceKind::T))
        .unwrap();
    assert_eq!(
        catalog
            .register(PieceKind::T, standard_shape(PieceKind::T))
            .unwrap_err(),
        CoreError::DuplicatePieceKind(PieceKind::T)
    );
}

#[test]
fn test_unknown_kind_lookup() {
    let catalog = PieceCatalog::new();
    assert!(matches!(
        catalog.rotations_of(PieceKind::Z),
        Err(CoreError::UnknownPieceKind(_))
    ));
    assert!(matches!(
        PieceCatalog::standard().rotations_of_name("Q"),
        Err(CoreError::UnknownPieceKind(name)) if name == "Q"
    ));
    assert!(PieceCatalog::standard().rotations_of_name("t").is_ok());
}

#[test]
fn test_matrix_normalizes_rotation() {
    let catalog = PieceCatalog::standard();
    assert_eq!(
        catalog.matrix(PieceKind::L, -1).unwrap(),
        catalog.matrix(PieceKind::L, 3).unwrap()
    );
    assert_eq!(
        catalog.matrix(PieceKind::L, 6).unwrap(),
        catalog.matrix(PieceKind::L, 2).unwrap()
    );
}

#[test]
fn test_custom_catalog_piece() {
    let mut catalog = PieceCatalog::new();
    let domino = ShapeMatrix::from_rows(&[&[1, 1]]).unwrap();
    catalog.register(PieceKind::I, domino).unwrap();

    let piece = Piece::from_catalog(&catalog, PieceKind::I).unwrap();
    assert_eq!(piece.cells().len(), 2);
}

// ============== Piece Tests ==============

#[test]
fn test_piece_rotation_wraps() {
    let mut piece = Piece::from_catalog(PieceCatalog::standard(), PieceKind::J).unwrap();
    piece.rotate(RotationDirection::Ccw);
    assert_eq!(piece.rotation(), 3);
    piece.rotate(RotationDirection::Cw);
    assert_eq!(piece.rotation(), 0);
    piece.set_rotation(-6);
    assert_eq!(piece.rotation(), 2);
}

#[test]
fn test_occupied_cells_override_position() {
    let mut piece = Piece::from_catalog(PieceCatalog::standard(), PieceKind::O).unwrap();
    piece.shift(2, 3);
    assert_eq!(piece.cells().as_slice(), &[(2, 3), (2, 4), (3, 3), (3, 4)]);
    assert_eq!(
        piece.occupied_cells(Some(-1), None).as_slice(),
        &[(-1, 3), (-1, 4), (0, 3), (0, 4)]
    );
    // Stored position untouched
    assert_eq!((piece.row(), piece.col()), (2, 3));
}
