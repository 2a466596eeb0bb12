//! In-process fleet store.
//!
//! [`InMemoryFleetStore`] keeps manufacturers, cars and drivers in ordered
//! maps behind one `RwLock`, so cascades and uniqueness checks see a
//! consistent snapshot. Identifiers are allocated sequentially from 1 and
//! never reused. State is lost when the process exits.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CarRepository, DriverRepository, FleetRepositoryError, ManufacturerRepository,
};
use crate::domain::{
    AssignmentChange, Car, CarDraft, CarId, Driver, DriverDraft, DriverId, LicenseNumber,
    Manufacturer, ManufacturerDraft, ManufacturerId, SearchFilter,
};

#[derive(Debug, Default)]
struct FleetTables {
    manufacturers: BTreeMap<ManufacturerId, Manufacturer>,
    cars: BTreeMap<CarId, Car>,
    drivers: BTreeMap<DriverId, Driver>,
    last_manufacturer_id: u64,
    last_car_id: u64,
    last_driver_id: u64,
}

impl FleetTables {
    fn ensure_unique_manufacturer_name(
        &self,
        name: &str,
        except: Option<ManufacturerId>,
    ) -> Result<(), FleetRepositoryError> {
        let taken = self
            .manufacturers
            .values()
            .any(|m| m.name() == name && Some(m.id()) != except);
        if taken {
            return Err(FleetRepositoryError::duplicate(
                "name",
                "Manufacturer with this Name already exists.",
            ));
        }
        Ok(())
    }

    fn ensure_unique_license(
        &self,
        license_number: &LicenseNumber,
        except: Option<DriverId>,
    ) -> Result<(), FleetRepositoryError> {
        let taken = self
            .drivers
            .values()
            .any(|d| d.license_number() == Some(license_number) && Some(d.id()) != except);
        if taken {
            return Err(FleetRepositoryError::duplicate(
                "license_number",
                "Driver with this License number already exists.",
            ));
        }
        Ok(())
    }

    fn ensure_car_references(&self, draft: &CarDraft) -> Result<(), FleetRepositoryError> {
        if !self.manufacturers.contains_key(&draft.manufacturer_id) {
            return Err(FleetRepositoryError::missing_reference(
                "manufacturer",
                draft.manufacturer_id.get(),
            ));
        }
        if let Some(unknown) = draft
            .drivers
            .iter()
            .find(|driver| !self.drivers.contains_key(*driver))
        {
            return Err(FleetRepositoryError::missing_reference(
                "drivers",
                unknown.get(),
            ));
        }
        Ok(())
    }
}

/// Fleet repositories backed by process memory.
///
/// # Examples
/// ```
/// use taxi_backend::domain::ports::ManufacturerRepository;
/// use taxi_backend::domain::{ManufacturerDraft, SearchFilter};
/// use taxi_backend::outbound::memory::InMemoryFleetStore;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryFleetStore::new();
/// let draft = ManufacturerDraft {
///     name: "Toyota".to_owned(),
///     country: "Japan".to_owned(),
/// };
/// let created = ManufacturerRepository::create(&store, draft).await.expect("stored");
/// assert_eq!(created.id().get(), 1);
/// let listed = ManufacturerRepository::list(&store, &SearchFilter::default())
///     .await
///     .expect("listed");
/// assert_eq!(listed.len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryFleetStore {
    tables: RwLock<FleetTables>,
}

impl InMemoryFleetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FleetTables>, FleetRepositoryError> {
        self.tables
            .read()
            .map_err(|_| FleetRepositoryError::query("fleet store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, FleetTables>, FleetRepositoryError> {
        self.tables
            .write()
            .map_err(|_| FleetRepositoryError::query("fleet store lock poisoned"))
    }
}

#[async_trait]
impl ManufacturerRepository for InMemoryFleetStore {
    async fn count(&self) -> Result<usize, FleetRepositoryError> {
        Ok(self.read()?.manufacturers.len())
    }

    async fn list(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<Manufacturer>, FleetRepositoryError> {
        let tables = self.read()?;
        let mut manufacturers: Vec<_> = tables
            .manufacturers
            .values()
            .filter(|m| filter.matches(m.name()))
            .cloned()
            .collect();
        manufacturers.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(manufacturers)
    }

    async fn find_by_id(
        &self,
        id: ManufacturerId,
    ) -> Result<Option<Manufacturer>, FleetRepositoryError> {
        Ok(self.read()?.manufacturers.get(&id).cloned())
    }

    async fn create(
        &self,
        draft: ManufacturerDraft,
    ) -> Result<Manufacturer, FleetRepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_unique_manufacturer_name(&draft.name, None)?;
        tables.last_manufacturer_id += 1;
        let manufacturer =
            Manufacturer::new(ManufacturerId::new(tables.last_manufacturer_id), draft);
        tables
            .manufacturers
            .insert(manufacturer.id(), manufacturer.clone());
        debug!(manufacturer_id = %manufacturer.id(), "manufacturer created");
        Ok(manufacturer)
    }

    async fn update(
        &self,
        id: ManufacturerId,
        draft: ManufacturerDraft,
    ) -> Result<Manufacturer, FleetRepositoryError> {
        let mut tables = self.write()?;
        if !tables.manufacturers.contains_key(&id) {
            return Err(FleetRepositoryError::not_found("manufacturer", id.get()));
        }
        tables.ensure_unique_manufacturer_name(&draft.name, Some(id))?;
        let manufacturer = Manufacturer::new(id, draft);
        tables.manufacturers.insert(id, manufacturer.clone());
        Ok(manufacturer)
    }

    async fn delete(&self, id: ManufacturerId) -> Result<(), FleetRepositoryError> {
        let mut tables = self.write()?;
        if tables.manufacturers.remove(&id).is_none() {
            return Err(FleetRepositoryError::not_found("manufacturer", id.get()));
        }
        tables.cars.retain(|_, car| car.manufacturer_id() != id);
        debug!(manufacturer_id = %id, "manufacturer deleted with its cars");
        Ok(())
    }
}

#[async_trait]
impl CarRepository for InMemoryFleetStore {
    async fn count(&self) -> Result<usize, FleetRepositoryError> {
        Ok(self.read()?.cars.len())
    }

    async fn list(&self, filter: &SearchFilter) -> Result<Vec<Car>, FleetRepositoryError> {
        Ok(self
            .read()?
            .cars
            .values()
            .filter(|car| filter.matches(car.model()))
            .cloned()
            .collect())
    }

    async fn list_for_driver(&self, driver: DriverId) -> Result<Vec<Car>, FleetRepositoryError> {
        Ok(self
            .read()?
            .cars
            .values()
            .filter(|car| car.is_assigned_to(driver))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, FleetRepositoryError> {
        Ok(self.read()?.cars.get(&id).cloned())
    }

    async fn create(&self, draft: CarDraft) -> Result<Car, FleetRepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_car_references(&draft)?;
        tables.last_car_id += 1;
        let car = Car::new(CarId::new(tables.last_car_id), draft);
        tables.cars.insert(car.id(), car.clone());
        debug!(car_id = %car.id(), "car created");
        Ok(car)
    }

    async fn update(&self, id: CarId, draft: CarDraft) -> Result<Car, FleetRepositoryError> {
        let mut tables = self.write()?;
        if !tables.cars.contains_key(&id) {
            return Err(FleetRepositoryError::not_found("car", id.get()));
        }
        tables.ensure_car_references(&draft)?;
        let car = Car::new(id, draft);
        tables.cars.insert(id, car.clone());
        Ok(car)
    }

    async fn delete(&self, id: CarId) -> Result<(), FleetRepositoryError> {
        self.write()?
            .cars
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| FleetRepositoryError::not_found("car", id.get()))
    }

    async fn toggle_driver(
        &self,
        id: CarId,
        driver: DriverId,
    ) -> Result<AssignmentChange, FleetRepositoryError> {
        let mut tables = self.write()?;
        if !tables.drivers.contains_key(&driver) {
            return Err(FleetRepositoryError::not_found("driver", driver.get()));
        }
        let car = tables
            .cars
            .get_mut(&id)
            .ok_or_else(|| FleetRepositoryError::not_found("car", id.get()))?;
        let change = car.toggle_driver(driver);
        debug!(car_id = %id, driver_id = %driver, ?change, "car assignment toggled");
        Ok(change)
    }
}

#[async_trait]
impl DriverRepository for InMemoryFleetStore {
    async fn count(&self) -> Result<usize, FleetRepositoryError> {
        Ok(self.read()?.drivers.len())
    }

    async fn list(&self, filter: &SearchFilter) -> Result<Vec<Driver>, FleetRepositoryError> {
        let tables = self.read()?;
        let mut drivers: Vec<_> = tables
            .drivers
            .values()
            .filter(|d| filter.matches(d.username()))
            .cloned()
            .collect();
        drivers.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(drivers)
    }

    async fn find_by_id(&self, id: DriverId) -> Result<Option<Driver>, FleetRepositoryError> {
        Ok(self.read()?.drivers.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Driver>, FleetRepositoryError> {
        Ok(self
            .read()?
            .drivers
            .values()
            .find(|d| d.username() == username)
            .cloned())
    }

    async fn create(&self, draft: DriverDraft) -> Result<Driver, FleetRepositoryError> {
        let mut tables = self.write()?;
        if tables.drivers.values().any(|d| d.username() == draft.username) {
            return Err(FleetRepositoryError::duplicate(
                "username",
                "A user with that username already exists.",
            ));
        }
        if let Some(license_number) = &draft.license_number {
            tables.ensure_unique_license(license_number, None)?;
        }
        tables.last_driver_id += 1;
        let driver = Driver::new(DriverId::new(tables.last_driver_id), draft);
        tables.drivers.insert(driver.id(), driver.clone());
        debug!(driver_id = %driver.id(), "driver created");
        Ok(driver)
    }

    async fn update_license_number(
        &self,
        id: DriverId,
        license_number: LicenseNumber,
    ) -> Result<Driver, FleetRepositoryError> {
        let mut tables = self.write()?;
        tables.ensure_unique_license(&license_number, Some(id))?;
        let driver = tables
            .drivers
            .get_mut(&id)
            .ok_or_else(|| FleetRepositoryError::not_found("driver", id.get()))?;
        driver.set_license_number(license_number);
        Ok(driver.clone())
    }

    async fn delete(&self, id: DriverId) -> Result<(), FleetRepositoryError> {
        let mut tables = self.write()?;
        if tables.drivers.remove(&id).is_none() {
            return Err(FleetRepositoryError::not_found("driver", id.get()));
        }
        for car in tables.cars.values_mut() {
            car.unassign(id);
        }
        debug!(driver_id = %id, "driver deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::PasswordHash;
    use rstest::{fixture, rstest};

    fn manufacturer_draft(name: &str) -> ManufacturerDraft {
        ManufacturerDraft {
            name: name.to_owned(),
            country: "Japan".to_owned(),
        }
    }

    fn driver_draft(username: &str, license: &str) -> DriverDraft {
        DriverDraft::new(username, PasswordHash::derive("testpassword")).with_license_number(
            LicenseNumber::parse(license).expect("valid license number"),
        )
    }

    fn car_draft(model: &str, manufacturer_id: ManufacturerId) -> CarDraft {
        CarDraft {
            model: model.to_owned(),
            manufacturer_id,
            drivers: BTreeSet::new(),
        }
    }

    #[fixture]
    fn store() -> InMemoryFleetStore {
        InMemoryFleetStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn manufacturers_are_listed_by_name_and_filtered(store: InMemoryFleetStore) {
        for name in ["Toyota", "BMW", "Test Manufacturer1"] {
            ManufacturerRepository::create(&store, manufacturer_draft(name))
                .await
                .expect("created");
        }
        let all = ManufacturerRepository::list(&store, &SearchFilter::default())
            .await
            .expect("listed");
        let names: Vec<_> = all.iter().map(Manufacturer::name).collect();
        assert_eq!(names, vec!["BMW", "Test Manufacturer1", "Toyota"]);

        let filtered = ManufacturerRepository::list(&store, &SearchFilter::containing("TEST"))
            .await
            .expect("listed");
        assert_eq!(filtered.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_sequential_from_one(store: InMemoryFleetStore) {
        let first = ManufacturerRepository::create(&store, manufacturer_draft("A"))
            .await
            .expect("created");
        let second = ManufacturerRepository::create(&store, manufacturer_draft("B"))
            .await
            .expect("created");
        assert_eq!((first.id().get(), second.id().get()), (1, 2));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_manufacturer_names_are_rejected(store: InMemoryFleetStore) {
        ManufacturerRepository::create(&store, manufacturer_draft("Toyota"))
            .await
            .expect("created");
        let err = ManufacturerRepository::create(&store, manufacturer_draft("Toyota"))
            .await
            .expect_err("duplicate rejected");
        assert!(matches!(err, FleetRepositoryError::Duplicate { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_manufacturer_cascades_to_cars(store: InMemoryFleetStore) {
        let toyota = ManufacturerRepository::create(&store, manufacturer_draft("Toyota"))
            .await
            .expect("created");
        let bmw = ManufacturerRepository::create(&store, manufacturer_draft("BMW"))
            .await
            .expect("created");
        CarRepository::create(&store, car_draft("Camry", toyota.id()))
            .await
            .expect("created");
        CarRepository::create(&store, car_draft("X5", bmw.id()))
            .await
            .expect("created");

        ManufacturerRepository::delete(&store, toyota.id())
            .await
            .expect("deleted");

        let cars = CarRepository::list(&store, &SearchFilter::default())
            .await
            .expect("listed");
        assert_eq!(cars.iter().map(Car::model).collect::<Vec<_>>(), vec!["X5"]);
    }

    #[rstest]
    #[tokio::test]
    async fn cars_require_existing_references(store: InMemoryFleetStore) {
        let err = CarRepository::create(&store, car_draft("Camry", ManufacturerId::new(9)))
            .await
            .expect_err("unknown manufacturer");
        assert_eq!(err, FleetRepositoryError::missing_reference("manufacturer", 9_u64));
    }

    #[rstest]
    #[tokio::test]
    async fn toggling_assigns_then_unassigns(store: InMemoryFleetStore) {
        let maker = ManufacturerRepository::create(&store, manufacturer_draft("Toyota"))
            .await
            .expect("created");
        let car = CarRepository::create(&store, car_draft("Camry", maker.id()))
            .await
            .expect("created");
        let driver = DriverRepository::create(&store, driver_draft("testuser", "ABC12345"))
            .await
            .expect("created");

        let first = store.toggle_driver(car.id(), driver.id()).await.expect("toggled");
        assert_eq!(first, AssignmentChange::Assigned);
        let cars = store.list_for_driver(driver.id()).await.expect("listed");
        assert_eq!(cars.len(), 1);

        let second = store.toggle_driver(car.id(), driver.id()).await.expect("toggled");
        assert_eq!(second, AssignmentChange::Unassigned);
        assert!(store.list_for_driver(driver.id()).await.expect("listed").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_driver_clears_assignments(store: InMemoryFleetStore) {
        let maker = ManufacturerRepository::create(&store, manufacturer_draft("Toyota"))
            .await
            .expect("created");
        let driver = DriverRepository::create(&store, driver_draft("testuser", "ABC12345"))
            .await
            .expect("created");
        let mut draft = car_draft("Camry", maker.id());
        draft.drivers.insert(driver.id());
        let car = CarRepository::create(&store, draft).await.expect("created");

        DriverRepository::delete(&store, driver.id())
            .await
            .expect("deleted");

        let stored = CarRepository::find_by_id(&store, car.id())
            .await
            .expect("read")
            .expect("car survives");
        assert!(stored.drivers().is_empty());
    }

    #[rstest]
    #[case("testuser", "XYZ98765", "username")]
    #[case("other", "ABC12345", "license_number")]
    #[tokio::test]
    async fn driver_uniqueness_is_enforced(
        store: InMemoryFleetStore,
        #[case] username: &str,
        #[case] license: &str,
        #[case] field: &str,
    ) {
        DriverRepository::create(&store, driver_draft("testuser", "ABC12345"))
            .await
            .expect("created");
        let err = DriverRepository::create(&store, driver_draft(username, license))
            .await
            .expect_err("duplicate rejected");
        match err {
            FleetRepositoryError::Duplicate { field: reported, .. } => assert_eq!(reported, field),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn license_updates_allow_keeping_the_same_number(store: InMemoryFleetStore) {
        let driver = DriverRepository::create(&store, driver_draft("testuser", "ABC12345"))
            .await
            .expect("created");
        let same = LicenseNumber::parse("ABC12345").expect("valid");
        let updated = store
            .update_license_number(driver.id(), same)
            .await
            .expect("updated");
        assert_eq!(updated.license_number().map(LicenseNumber::as_str), Some("ABC12345"));

        let missing = store
            .update_license_number(DriverId::new(42), LicenseNumber::parse("QWE11111").expect("valid"))
            .await
            .expect_err("unknown driver");
        assert_eq!(missing, FleetRepositoryError::not_found("driver", 42_u64));
    }

    #[rstest]
    #[tokio::test]
    async fn drivers_are_found_by_username(store: InMemoryFleetStore) {
        DriverRepository::create(&store, driver_draft("Test Driver123", "ABC12312"))
            .await
            .expect("created");
        let found = store
            .find_by_username("Test Driver123")
            .await
            .expect("read");
        assert!(found.is_some());
        assert!(store.find_by_username("test driver123").await.expect("read").is_none());
    }
}
