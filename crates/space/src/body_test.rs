mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use crate::body::{Body, BodyKind, Dynamics, Motion};
    use crate::frame::FrameId;

    fn ship() -> Body {
        Body::dynamic("ship", BodyKind::Ship, 2.0, 3.0, FrameId(0), Vector3::zeros())
    }

    #[test]
    fn test_sphere_inertia() {
        let d = Dynamics::sphere(10.0, 2.0);
        assert_relative_eq!(d.angular_inertia, 16.0);
        assert_relative_eq!(d.inv_mass(), 0.1);
        assert_relative_eq!(d.inv_angular_inertia(), 1.0 / 16.0);
    }

    #[test]
    fn test_massless_dynamics_do_not_divide_by_zero() {
        let d = Dynamics::sphere(0.0, 1.0);
        assert_eq!(d.inv_mass(), 0.0);
        assert_eq!(d.inv_angular_inertia(), 0.0);
    }

    #[test]
    fn test_dynamic_constructor() {
        let body = ship();
        assert!(body.is_dynamic());
        assert!(!body.is_dead());
        assert_eq!(body.frame, Some(FrameId(0)));
        assert_relative_eq!(body.geom.radius, 3.0);
        assert_relative_eq!(body.dynamics().unwrap().mass, 2.0);
    }

    #[test]
    fn test_static_bodies_ignore_velocity_and_force() {
        let mut body = Body::new("port", BodyKind::Starport, Motion::Fixed, 100.0);
        body.set_velocity(Vector3::new(1.0, 0.0, 0.0));
        body.apply_force(Vector3::new(1.0, 0.0, 0.0));
        body.integrate(Vector3::new(0.0, -9.8, 0.0), 1.0);
        assert_eq!(body.velocity(), Vector3::zeros());
        assert_eq!(body.position, Vector3::zeros());
    }

    #[test]
    fn test_integration_is_semi_implicit() {
        let mut body = ship();
        body.integrate(Vector3::new(0.0, -10.0, 0.0), 0.5);
        // velocity first, then position with the new velocity
        assert_relative_eq!(body.velocity(), Vector3::new(0.0, -5.0, 0.0));
        assert_relative_eq!(body.position, Vector3::new(0.0, -2.5, 0.0));
    }

    #[test]
    fn test_force_applies_for_one_step() {
        let mut body = ship();
        body.apply_force(Vector3::new(4.0, 0.0, 0.0));
        body.integrate(Vector3::zeros(), 1.0);
        assert_relative_eq!(body.velocity(), Vector3::new(2.0, 0.0, 0.0));

        body.integrate(Vector3::zeros(), 1.0);
        assert_relative_eq!(body.velocity(), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(body.dynamics().unwrap().force, Vector3::zeros());
    }

    #[test]
    fn test_spin_keeps_orientation_orthonormal() {
        let mut body = ship();
        body.dynamics_mut().unwrap().angular_velocity = Vector3::new(0.3, 1.0, -0.2);
        for _ in 0..1000 {
            body.integrate(Vector3::zeros(), 0.01);
        }
        let m = body.orientation;
        assert_relative_eq!(m.transpose() * m, nalgebra::Matrix3::identity(), epsilon = 1e-9);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_momentum_and_energy() {
        let mut body = ship();
        body.set_velocity(Vector3::new(3.0, 4.0, 0.0));
        let d = body.dynamics().unwrap();
        assert_relative_eq!(d.momentum(), Vector3::new(6.0, 8.0, 0.0));
        assert_relative_eq!(d.kinetic_energy(), 25.0);
    }
}
